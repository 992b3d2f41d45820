use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("decoding a dkg bundle failed: {0}")]
    Decode(String),

    #[error("dealer {dealer_idx} signed its deal bundle with an invalid signature")]
    BadDealSignature { dealer_idx: u32 },

    #[error("dealer {dealer_idx}'s share for index {share_idx} failed decryption")]
    ShareDecryptFailed { dealer_idx: u32, share_idx: u32 },

    #[error("fewer than the threshold ({threshold}) of dealers qualified; only {qualified} survived justification")]
    InsufficientQualifyingDealers { qualified: usize, threshold: usize },

    #[error("this node was evicted from the qualifying set")]
    Evicted,

    #[error("board error: {0}")]
    Board(#[from] dkg_board::BoardError),

    #[error("driver cancelled")]
    Cancelled,
}
