use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("board capacity {capacity} is below the ceremony size {n}")]
    CapacityBelowGroupSize { capacity: usize, n: usize },

    #[error("board channel closed, driver has already exited")]
    Closed,

    #[error("board receivers already taken by the driver")]
    ReceiversAlreadyTaken,
}
