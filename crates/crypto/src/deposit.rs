//! Deposit message signing root.
//!
//! A minimal, self-contained SSZ `hash_tree_root`/signing-domain
//! implementation covering exactly the `DepositMessage` and `SigningData`
//! containers this ceremony needs — not a general SSZ library.

use dkg_types::EthNetwork;
use sha2::{Digest, Sha256};

pub const MAX_EFFECTIVE_BALANCE_GWEI: u64 = 32_000_000_000;
const DOMAIN_DEPOSIT: [u8; 4] = [0x03, 0x00, 0x00, 0x00];

fn sha256_pair(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(a);
    hasher.update(b);
    let out = hasher.finalize();
    let mut buf = [0u8; 32];
    buf.copy_from_slice(&out);
    buf
}

/// Binary Merkle root over a power-of-two-padded list of 32-byte chunks.
fn merkleize(mut chunks: Vec<[u8; 32]>) -> [u8; 32] {
    let mut size = 1usize;
    while size < chunks.len().max(1) {
        size *= 2;
    }
    chunks.resize(size, [0u8; 32]);
    while chunks.len() > 1 {
        chunks = chunks
            .chunks(2)
            .map(|pair| sha256_pair(&pair[0], &pair[1]))
            .collect();
    }
    chunks[0]
}

fn pack(data: &[u8]) -> Vec<[u8; 32]> {
    let mut chunks: Vec<[u8; 32]> = data
        .chunks(32)
        .map(|c| {
            let mut buf = [0u8; 32];
            buf[..c.len()].copy_from_slice(c);
            buf
        })
        .collect();
    if chunks.is_empty() {
        chunks.push([0u8; 32]);
    }
    chunks
}

fn root_of_bytes(data: &[u8]) -> [u8; 32] {
    merkleize(pack(data))
}

fn root_of_u64(value: u64) -> [u8; 32] {
    let mut buf = [0u8; 32];
    buf[..8].copy_from_slice(&value.to_le_bytes());
    buf
}

/// `DepositMessage { pubkey: Bytes48, withdrawal_credentials: Bytes32,
/// amount: u64 }`.
pub struct DepositMessage {
    pub validator_pubkey: [u8; 48],
    pub withdrawal_credentials: [u8; 32],
    pub amount_gwei: u64,
}

impl DepositMessage {
    pub fn new(validator_pubkey: [u8; 48], withdrawal_credentials: [u8; 32]) -> Self {
        Self {
            validator_pubkey,
            withdrawal_credentials,
            amount_gwei: MAX_EFFECTIVE_BALANCE_GWEI,
        }
    }

    /// Hash tree root of the 3-field container, rounded up to 4 leaves.
    pub fn hash_tree_root(&self) -> [u8; 32] {
        let leaves = vec![
            root_of_bytes(&self.validator_pubkey),
            root_of_bytes(&self.withdrawal_credentials),
            root_of_u64(self.amount_gwei),
            [0u8; 32],
        ];
        merkleize(leaves)
    }
}

fn fork_data_root(current_version: [u8; 4], genesis_validators_root: [u8; 32]) -> [u8; 32] {
    let mut version_chunk = [0u8; 32];
    version_chunk[..4].copy_from_slice(&current_version);
    merkleize(vec![version_chunk, genesis_validators_root])
}

/// `compute_domain(DOMAIN_DEPOSIT, ...)`. Deposits always use the zero
/// genesis validators root; the network's fork version is what separates
/// one chain's deposit domain from another's.
pub fn compute_deposit_domain(network: EthNetwork) -> [u8; 32] {
    let root = fork_data_root(network.fork_version(), [0u8; 32]);
    let mut domain = [0u8; 32];
    domain[..4].copy_from_slice(&DOMAIN_DEPOSIT);
    domain[4..].copy_from_slice(&root[..28]);
    domain
}

/// `SigningData { object_root: deposit_message_root, domain }`, the bytes
/// actually signed by the validator's BLS key.
pub fn deposit_signing_root(message: &DepositMessage, network: EthNetwork) -> [u8; 32] {
    let domain = compute_deposit_domain(network);
    merkleize(vec![message.hash_tree_root(), domain])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signing_root_is_deterministic() {
        let msg = DepositMessage::new([0x42u8; 48], [0x01u8; 32]);
        let a = deposit_signing_root(&msg, EthNetwork::Mainnet);
        let b = deposit_signing_root(&msg, EthNetwork::Mainnet);
        assert_eq!(a, b);
    }

    #[test]
    fn signing_root_differs_across_networks() {
        let msg = DepositMessage::new([0x42u8; 48], [0x01u8; 32]);
        let mainnet = deposit_signing_root(&msg, EthNetwork::Mainnet);
        let prater = deposit_signing_root(&msg, EthNetwork::Prater);
        assert_ne!(mainnet, prater);
    }
}
