use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedShare {
    pub share_idx: u32,
    /// ECIES ciphertext over the recipient's DKG exchange key.
    pub ciphertext: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealBundle {
    pub dealer_idx: u32,
    pub shares: Vec<EncryptedShare>,
    /// Compressed G1 commitments to this dealer's polynomial coefficients,
    /// `threshold` of them, constant term first.
    pub commitments: Vec<[u8; 48]>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedDealBundle {
    pub bundle: DealBundle,
    /// Compressed G2 signature over `(nonce, bundle)`, keyed by the
    /// dealer's long-term exchange scalar.
    pub signature: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Success,
    Complaint,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub dealer_idx: u32,
    pub status: Status,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseBundle {
    pub share_idx: u32,
    pub responses: Vec<Response>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Justification {
    pub share_idx: u32,
    pub cleartext_share: [u8; 32],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JustificationBundle {
    pub dealer_idx: u32,
    pub justifications: Vec<Justification>,
}
