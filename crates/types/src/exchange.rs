use crate::operator::OperatorId;
use serde::{Deserialize, Serialize};

/// One operator's ephemeral DKG exchange key: a compressed BLS12-381 G1
/// point, 48 bytes, serialized by `dkg-crypto`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeEntry {
    pub operator_id: OperatorId,
    pub public_key: Vec<u8>,
}
