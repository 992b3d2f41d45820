use bls12_381::G1Affine;
use dkg_crypto::suite::decompress_g1;
use dkg_crypto::CryptoError;
use dkg_types::{ExchangeEntry, OperatorId};

/// One participant's place in this DKG run: its evaluation index (0-based,
/// contiguous) and its long-term exchange public key.
#[derive(Debug, Clone)]
pub struct Node {
    pub index: u32,
    pub operator_id: OperatorId,
    pub public: G1Affine,
}

/// Builds the node list from exchange entries. Operator ids need not be
/// contiguous (`operator_id - 1` is only a convention when ids already run
/// `1..=n`): this sorts by operator id and reindexes `0..n` so the DKG math
/// below never has to reason about a sparse index space.
pub fn build_nodes(exchanges: &[ExchangeEntry]) -> Result<Vec<Node>, CryptoError> {
    let mut sorted: Vec<&ExchangeEntry> = exchanges.iter().collect();
    sorted.sort_by_key(|e| e.operator_id);

    sorted
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let public = decompress_g1(&entry.public_key)?;
            Ok(Node {
                index: index as u32,
                operator_id: entry.operator_id,
                public,
            })
        })
        .collect()
}

pub fn index_of(nodes: &[Node], operator_id: OperatorId) -> Option<u32> {
    nodes
        .iter()
        .find(|n| n.operator_id == operator_id)
        .map(|n| n.index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dkg_crypto::suite::{compress_g1, scalar_to_g1};
    use rand::rngs::OsRng;

    #[test]
    fn non_contiguous_operator_ids_are_sorted_and_reindexed() {
        let mut rng = OsRng;
        let exchanges: Vec<ExchangeEntry> = [10u64, 3, 7]
            .iter()
            .map(|&id| {
                let secret = dkg_crypto::suite::random_scalar(&mut rng);
                ExchangeEntry {
                    operator_id: OperatorId(id),
                    public_key: compress_g1(&scalar_to_g1(&secret)).to_vec(),
                }
            })
            .collect();

        let nodes = build_nodes(&exchanges).unwrap();
        let ids: Vec<u64> = nodes.iter().map(|n| n.operator_id.get()).collect();
        assert_eq!(ids, vec![3, 7, 10]);
        assert_eq!(nodes.iter().map(|n| n.index).collect::<Vec<_>>(), vec![0, 1, 2]);
    }
}
