use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("expected a {expected}-byte curve point, got {got}")]
    BadPointLength { expected: usize, got: usize },

    #[error("invalid curve point encoding")]
    InvalidPoint,

    #[error("rsa operation failed: {0}")]
    Rsa(String),

    #[error("signature authentication failed")]
    AuthFailed,

    #[error("share round-trip through rsa encrypt/decrypt did not match")]
    ShareRoundTripMismatch,
}
