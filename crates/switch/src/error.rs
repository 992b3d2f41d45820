use thiserror::Error;

/// Same six-way taxonomy as `dkg_ceremony::CeremonyError`, composed one
/// level up at the per-operator registry boundary.
#[derive(Debug, Error)]
pub enum SwitchError {
    #[error("authentication failed: {0}")]
    ProtocolAuth(String),

    #[error("illegal request for current switch state: {0}")]
    ProtocolState(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("capacity exceeded: {0}")]
    Capacity(String),

    #[error("fatal cryptographic failure: {0}")]
    CryptoFatal(String),

    #[error("evicted from qualifying set")]
    Evicted,
}

impl From<dkg_ceremony::CeremonyError> for SwitchError {
    fn from(e: dkg_ceremony::CeremonyError) -> Self {
        match e {
            dkg_ceremony::CeremonyError::ProtocolAuth(m) => SwitchError::ProtocolAuth(m),
            dkg_ceremony::CeremonyError::ProtocolState(m) => SwitchError::ProtocolState(m),
            dkg_ceremony::CeremonyError::Decode(m) => SwitchError::Decode(m),
            dkg_ceremony::CeremonyError::Capacity(m) => SwitchError::Capacity(m),
            dkg_ceremony::CeremonyError::CryptoFatal(m) => SwitchError::CryptoFatal(m),
            dkg_ceremony::CeremonyError::Evicted => SwitchError::Evicted,
        }
    }
}

impl From<dkg_types::TypesError> for SwitchError {
    fn from(e: dkg_types::TypesError) -> Self {
        SwitchError::Decode(e.to_string())
    }
}

impl From<dkg_wire::WireError> for SwitchError {
    fn from(e: dkg_wire::WireError) -> Self {
        SwitchError::Decode(e.to_string())
    }
}

impl From<dkg_crypto::CryptoError> for SwitchError {
    fn from(e: dkg_crypto::CryptoError) -> Self {
        SwitchError::CryptoFatal(e.to_string())
    }
}

impl From<dkg_board::BoardError> for SwitchError {
    fn from(e: dkg_board::BoardError) -> Self {
        match e {
            dkg_board::BoardError::CapacityBelowGroupSize { .. } => {
                SwitchError::Capacity(e.to_string())
            }
            other => SwitchError::ProtocolState(other.to_string()),
        }
    }
}
