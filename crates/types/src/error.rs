use thiserror::Error;

/// Structural validation failures for DKG data model types.
///
/// These are raised before any cryptographic material is touched, so they
/// carry no payload bytes — only what was wrong.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesError {
    #[error("duplicate operator id {0} in init message")]
    DuplicateOperatorId(u64),

    #[error("threshold {threshold} out of range for {n} operators (must satisfy ceil(2n/3) <= t <= n-1)")]
    ThresholdOutOfRange { threshold: u64, n: usize },

    #[error("init message has no operators")]
    EmptyOperatorSet,

    #[error("operator id must be >= 1, got {0}")]
    ZeroOperatorId(u64),

    #[error("request id must be exactly 24 bytes, got {0}")]
    BadRequestIdLength(usize),
}
