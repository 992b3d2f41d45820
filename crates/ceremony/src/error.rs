use thiserror::Error;

/// The ceremony-wide error taxonomy. Every failure path in a `LocalOwner`
/// maps to exactly one of these; nothing here is retried automatically.
#[derive(Debug, Error)]
pub enum CeremonyError {
    /// An RSA or BLS signature failed to verify.
    #[error("authentication failed: {0}")]
    ProtocolAuth(String),

    /// A message arrived that is not legal in the instance's current state
    /// (duplicate Exchange, Kyber message before DKG start, message for an
    /// already-terminal instance).
    #[error("illegal message for current ceremony state: {0}")]
    ProtocolState(String),

    /// A transport or bundle failed to decode.
    #[error("decode error: {0}")]
    Decode(String),

    /// A resource limit was hit (board channel capacity, instance cap).
    #[error("capacity exceeded: {0}")]
    Capacity(String),

    /// An unrecoverable cryptographic failure: a self-check that must hold
    /// by construction did not.
    #[error("fatal cryptographic failure: {0}")]
    CryptoFatal(String),

    /// This node was evicted from the DKG's qualifying set.
    #[error("evicted from qualifying set")]
    Evicted,
}

impl From<dkg_wire::WireError> for CeremonyError {
    fn from(e: dkg_wire::WireError) -> Self {
        CeremonyError::Decode(e.to_string())
    }
}

impl From<dkg_crypto::CryptoError> for CeremonyError {
    fn from(e: dkg_crypto::CryptoError) -> Self {
        CeremonyError::CryptoFatal(e.to_string())
    }
}

impl From<dkg_board::BoardError> for CeremonyError {
    fn from(e: dkg_board::BoardError) -> Self {
        match e {
            dkg_board::BoardError::CapacityBelowGroupSize { .. } => {
                CeremonyError::Capacity(e.to_string())
            }
            other => CeremonyError::ProtocolState(other.to_string()),
        }
    }
}

impl From<dkg_protocol::ProtocolError> for CeremonyError {
    fn from(e: dkg_protocol::ProtocolError) -> Self {
        match e {
            dkg_protocol::ProtocolError::Evicted => CeremonyError::Evicted,
            dkg_protocol::ProtocolError::InsufficientQualifyingDealers { .. } => {
                CeremonyError::CryptoFatal(e.to_string())
            }
            dkg_protocol::ProtocolError::BadDealSignature { .. } => {
                CeremonyError::ProtocolAuth(e.to_string())
            }
            dkg_protocol::ProtocolError::Decode(_) => CeremonyError::Decode(e.to_string()),
            dkg_protocol::ProtocolError::ShareDecryptFailed { .. } => {
                CeremonyError::ProtocolAuth(e.to_string())
            }
            dkg_protocol::ProtocolError::Board(board_err) => board_err.into(),
            dkg_protocol::ProtocolError::Cancelled => {
                CeremonyError::ProtocolState("dkg driver cancelled".into())
            }
        }
    }
}
