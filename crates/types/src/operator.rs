use serde::{Deserialize, Serialize};

/// Identifier of an operator within a ceremony, 1-based.
///
/// The DKG share index used in `dkg-protocol` is always `id - 1`; operator
/// ids need not be contiguous (see `dkg_protocol::node_index_for`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OperatorId(pub u64);

impl OperatorId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for OperatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An operator descriptor as embedded in an `Init` message: who they are,
/// where they live, and the RSA public key used to authenticate everything
/// they send for the lifetime of the ceremony.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operator {
    pub id: OperatorId,
    pub address: String,
    /// DER-encoded RSA public key (SubjectPublicKeyInfo).
    pub rsa_public_key_der: Vec<u8>,
}

impl PartialEq for Operator {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.address == other.address
            && self.rsa_public_key_der == other.rsa_public_key_der
    }
}
