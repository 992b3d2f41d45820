use crate::error::TypesError;
use serde::{Deserialize, Serialize};

/// 24 opaque bytes chosen by the initiator, unique within a single `Switch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(pub [u8; 24]);

impl RequestId {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, TypesError> {
        if bytes.len() != 24 {
            return Err(TypesError::BadRequestIdLength(bytes.len()));
        }
        let mut buf = [0u8; 24];
        buf.copy_from_slice(bytes);
        Ok(Self(buf))
    }

    pub fn as_bytes(&self) -> &[u8; 24] {
        &self.0
    }

    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
