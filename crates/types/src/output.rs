use crate::operator::OperatorId;
use crate::request::RequestId;
use serde::{Deserialize, Serialize};

/// What one operator publishes once its ceremony instance reaches `Done`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Output {
    pub request_id: RequestId,
    pub operator_id: OperatorId,
    /// DER-encoded RSA public key of this operator (echoed for the
    /// initiator's convenience when assembling the final deposit data).
    pub operator_rsa_public_key_der: Vec<u8>,
    /// This operator's DKG secret share, RSA-encrypted under its own key.
    pub encrypted_share: Vec<u8>,
    /// Compressed BLS12-381 G1 point: `share_secret * G1`.
    pub share_public_key: Vec<u8>,
    /// Compressed BLS12-381 G1 point: the aggregate validator public key.
    pub validator_public_key: Vec<u8>,
    /// Compressed BLS12-381 G2 point: partial signature over the deposit
    /// message signing root.
    pub deposit_partial_signature: Vec<u8>,
    /// Compressed BLS12-381 G2 point: partial signature over
    /// `keccak256(owner || ":" || nonce)`.
    pub owner_nonce_partial_signature: Vec<u8>,
}
