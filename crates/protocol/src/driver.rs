use crate::bundles::{
    DealBundle, EncryptedShare, Justification, JustificationBundle, Response, ResponseBundle,
    SignedDealBundle, Status,
};
use crate::error::ProtocolError;
use crate::node::Node;
use crate::poly::{sum_commitment_vectors, verify_share_against_commitments, PrivatePoly};
use crate::signing::{sign_deal_bundle, verify_deal_bundle};
use bls12_381::{G1Affine, Scalar};
use dkg_board::{Board, BoardReceivers};
use dkg_crypto::{ecies, suite};
use dkg_types::OperatorId;
use rand::rngs::OsRng;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// This node's output once the ceremony's DKG phase completes: its share of
/// the group secret, and the qualifying set's aggregate public polynomial
/// (whose constant term is the validator's BLS public key).
pub struct DkgResult {
    pub own_index: u32,
    pub share_secret: Scalar,
    pub qualifying_commitments: Vec<G1Affine>,
}

pub struct DkgDriver {
    own_index: u32,
    nodes: Vec<Node>,
    threshold: usize,
    nonce: [u8; 32],
    own_exchange_secret: Scalar,
}

impl DkgDriver {
    pub fn new(
        own_operator_id: OperatorId,
        nodes: Vec<Node>,
        threshold: usize,
        nonce: [u8; 32],
        own_exchange_secret: Scalar,
    ) -> Result<Self, ProtocolError> {
        let own_index = crate::node::index_of(&nodes, own_operator_id)
            .ok_or_else(|| ProtocolError::Decode("own operator id missing from node list".into()))?;
        Ok(Self {
            own_index,
            nodes,
            threshold,
            nonce,
            own_exchange_secret,
        })
    }

    /// Runs deal -> response -> (maybe) justification -> result, publishing
    /// this node's own output through `board` at each phase and reading
    /// peers' (and its own looped-back) output from the same board.
    pub async fn run(self, board: Arc<Board>, cancel: CancellationToken) -> Result<DkgResult, ProtocolError> {
        let n = self.nodes.len();
        let mut rng = OsRng;

        let my_poly = PrivatePoly::random(self.threshold, &mut rng);
        let commitments = my_poly.commit();
        let shares: Vec<EncryptedShare> = self
            .nodes
            .iter()
            .map(|node| {
                let s = my_poly.eval(node.index);
                let ciphertext = ecies::encrypt_scalar(&node.public, &s, &mut rng);
                EncryptedShare {
                    share_idx: node.index,
                    ciphertext,
                }
            })
            .collect();
        let my_bundle = DealBundle {
            dealer_idx: self.own_index,
            shares,
            commitments: commitments.iter().map(suite::compress_g1).collect(),
        };
        let my_signed = sign_deal_bundle(&self.own_exchange_secret, &self.nonce, my_bundle);
        let my_deal_bytes = bincode::serialize(&my_signed).expect("SignedDealBundle always serializes");

        let mut receivers = board.take_receivers().await?;
        board.publish_deal(my_deal_bytes.clone()).await;
        board.push_deal(my_deal_bytes).await?;

        info!(own_index = self.own_index, n, "deal phase started");
        let (mut my_shares, dealer_commitments, my_responses) = run_deal_phase(
            &self.nodes,
            self.own_index,
            n,
            &self.nonce,
            &self.own_exchange_secret,
            &mut receivers,
            &cancel,
        )
        .await?;

        let my_response_bundle = ResponseBundle {
            share_idx: self.own_index,
            responses: my_responses,
        };
        let my_response_bytes =
            bincode::serialize(&my_response_bundle).expect("ResponseBundle always serializes");
        board.publish_response(my_response_bytes.clone()).await;
        board.push_response(my_response_bytes).await?;

        info!(own_index = self.own_index, "response phase started");
        let complaints = run_response_phase(n, &mut receivers, &cancel).await?;

        let mut evicted: HashSet<u32> = HashSet::new();
        if !complaints.is_empty() {
            warn!(complaints = complaints.len(), "complaints raised, entering justification phase");
            if let Some(justification_bytes) = build_own_justification(self.own_index, &complaints, &my_poly, n) {
                board.publish_justification(justification_bytes.clone()).await;
                board.push_justification(justification_bytes).await?;
            }
            let (justification_evicted, exonerated_shares) =
                run_justification_phase(self.own_index, &complaints, &dealer_commitments, &mut receivers, &cancel)
                    .await?;
            evicted = justification_evicted;
            my_shares.extend(exonerated_shares);
        }

        let qualifying_dealers: Vec<u32> = (0..n as u32).filter(|idx| !evicted.contains(idx)).collect();
        if qualifying_dealers.len() < self.threshold {
            return Err(ProtocolError::InsufficientQualifyingDealers {
                qualified: qualifying_dealers.len(),
                threshold: self.threshold,
            });
        }
        if evicted.contains(&self.own_index) {
            return Err(ProtocolError::Evicted);
        }

        let share_secret = suite::sum_scalars(
            qualifying_dealers
                .iter()
                .filter_map(|idx| my_shares.get(idx).copied()),
        );
        let qualifying_commitments = sum_commitment_vectors(
            &qualifying_dealers
                .iter()
                .filter_map(|idx| dealer_commitments.get(idx).cloned())
                .collect::<Vec<_>>(),
        );

        debug!(qualified = qualifying_dealers.len(), "dkg result computed");
        Ok(DkgResult {
            own_index: self.own_index,
            share_secret,
            qualifying_commitments,
        })
    }
}

/// Drains exactly `n` deal bundles (one per dealer, including ourselves,
/// looped back through the same board), decrypting and verifying our own
/// share out of each and recording a per-dealer `Response`.
async fn run_deal_phase(
    nodes: &[Node],
    own_index: u32,
    n: usize,
    nonce: &[u8; 32],
    own_exchange_secret: &Scalar,
    receivers: &mut BoardReceivers,
    cancel: &CancellationToken,
) -> Result<
    (
        HashMap<u32, Scalar>,
        HashMap<u32, Vec<G1Affine>>,
        Vec<Response>,
    ),
    ProtocolError,
> {
    let mut my_shares = HashMap::new();
    let mut dealer_commitments = HashMap::new();
    let mut responses = Vec::with_capacity(n);
    let mut seen = HashSet::new();

    while seen.len() < n {
        let bytes = tokio::select! {
            _ = cancel.cancelled() => return Err(ProtocolError::Cancelled),
            maybe = receivers.deal_rx.recv() => maybe.ok_or(ProtocolError::Board(dkg_board::BoardError::Closed))?,
        };
        let signed: SignedDealBundle =
            bincode::deserialize(&bytes).map_err(|e| ProtocolError::Decode(e.to_string()))?;
        let dealer_idx = signed.bundle.dealer_idx;
        if !seen.insert(dealer_idx) {
            continue;
        }

        let dealer_public = nodes.iter().find(|nd| nd.index == dealer_idx).map(|nd| nd.public);
        let commitments: Vec<G1Affine> = signed
            .bundle
            .commitments
            .iter()
            .filter_map(|c| suite::decompress_g1(c).ok())
            .collect();
        let sig_ok = dealer_public
            .as_ref()
            .map(|public| verify_deal_bundle(public, nonce, &signed).is_ok())
            .unwrap_or(false);

        let status = if sig_ok && commitments.len() == signed.bundle.commitments.len() {
            match signed.bundle.shares.iter().find(|s| s.share_idx == own_index) {
                Some(enc) => match ecies::decrypt_scalar(own_exchange_secret, &enc.ciphertext) {
                    Ok(share) if verify_share_against_commitments(own_index, &share, &commitments) => {
                        my_shares.insert(dealer_idx, share);
                        Status::Success
                    }
                    _ => Status::Complaint,
                },
                None => Status::Complaint,
            }
        } else {
            Status::Complaint
        };

        dealer_commitments.insert(dealer_idx, commitments);
        responses.push(Response { dealer_idx, status });
    }

    Ok((my_shares, dealer_commitments, responses))
}

async fn run_response_phase(
    n: usize,
    receivers: &mut BoardReceivers,
    cancel: &CancellationToken,
) -> Result<HashSet<u32>, ProtocolError> {
    let mut complaints = HashSet::new();
    let mut seen = HashSet::new();
    while seen.len() < n {
        let bytes = tokio::select! {
            _ = cancel.cancelled() => return Err(ProtocolError::Cancelled),
            maybe = receivers.response_rx.recv() => maybe.ok_or(ProtocolError::Board(dkg_board::BoardError::Closed))?,
        };
        let bundle: ResponseBundle =
            bincode::deserialize(&bytes).map_err(|e| ProtocolError::Decode(e.to_string()))?;
        if !seen.insert(bundle.share_idx) {
            continue;
        }
        for r in bundle.responses {
            if r.status == Status::Complaint {
                complaints.insert(r.dealer_idx);
            }
        }
    }
    Ok(complaints)
}

/// If we were accused, publish our cleartext evaluation at every index in
/// the group. Response bundles only tell us *which dealer* was complained
/// about, not which accuser raised it, so a justification covers every
/// possible accuser rather than a guessed subset.
fn build_own_justification(
    own_index: u32,
    complaints: &HashSet<u32>,
    my_poly: &PrivatePoly,
    n: usize,
) -> Option<Vec<u8>> {
    if !complaints.contains(&own_index) {
        return None;
    }
    let justifications: Vec<Justification> = (0..n as u32)
        .map(|idx| Justification {
            share_idx: idx,
            cleartext_share: my_poly.eval(idx).to_bytes(),
        })
        .collect();
    let bundle = JustificationBundle {
        dealer_idx: own_index,
        justifications,
    };
    Some(bincode::serialize(&bundle).expect("JustificationBundle always serializes"))
}

/// Resolves every complaint raised in the response phase. Returns the set of
/// dealers evicted for a bad justification, plus, for every exonerated
/// dealer, this node's own cleartext share at `own_index` — the deal-phase
/// decrypt that originally failed is superseded by the justification's
/// verified cleartext, so the exonerated dealer's contribution isn't lost
/// from `share_secret`.
async fn run_justification_phase(
    own_index: u32,
    complaints: &HashSet<u32>,
    dealer_commitments: &HashMap<u32, Vec<G1Affine>>,
    receivers: &mut BoardReceivers,
    cancel: &CancellationToken,
) -> Result<(HashSet<u32>, HashMap<u32, Scalar>), ProtocolError> {
    let mut evicted = HashSet::new();
    let mut exonerated = HashSet::new();
    let mut exonerated_shares = HashMap::new();

    while exonerated.len() + evicted.len() < complaints.len() {
        let bytes = tokio::select! {
            _ = cancel.cancelled() => return Err(ProtocolError::Cancelled),
            maybe = receivers.justification_rx.recv() => maybe.ok_or(ProtocolError::Board(dkg_board::BoardError::Closed))?,
        };
        let bundle: JustificationBundle =
            bincode::deserialize(&bytes).map_err(|e| ProtocolError::Decode(e.to_string()))?;
        let dealer_idx = bundle.dealer_idx;
        if !complaints.contains(&dealer_idx) || exonerated.contains(&dealer_idx) || evicted.contains(&dealer_idx) {
            continue;
        }
        let commitments = dealer_commitments.get(&dealer_idx).cloned().unwrap_or_default();
        let mut own_share = None;
        let all_valid = bundle.justifications.iter().all(|j| {
            match Option::<Scalar>::from(Scalar::from_bytes(&j.cleartext_share)) {
                Some(s) if verify_share_against_commitments(j.share_idx, &s, &commitments) => {
                    if j.share_idx == own_index {
                        own_share = Some(s);
                    }
                    true
                }
                _ => false,
            }
        });
        if all_valid {
            exonerated.insert(dealer_idx);
            if let Some(s) = own_share {
                exonerated_shares.insert(dealer_idx, s);
            }
        } else {
            evicted.insert(dealer_idx);
        }
    }
    Ok((evicted, exonerated_shares))
}
