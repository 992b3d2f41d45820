use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WireError {
    #[error("buffer too short: needed {needed} more bytes, had {remaining}")]
    Truncated { needed: usize, remaining: usize },

    #[error("{0} trailing bytes after decoding a complete message")]
    TrailingBytes(usize),

    #[error("unknown transport type tag {0}")]
    UnknownTransportType(u8),

    #[error("unknown kyber message type tag {0}")]
    UnknownKyberType(u8),

    #[error("field {field} exceeds maximum length {max}, got {got}")]
    FieldTooLong {
        field: &'static str,
        max: usize,
        got: usize,
    },

    #[error("field {0} is not valid UTF-8")]
    InvalidUtf8(&'static str),
}
