//! Adapts the DKG protocol driver's pull-based round API to asynchronous
//! message arrival over authenticated transport.

pub mod board;
pub mod error;
pub mod sink;

pub use board::{Board, BoardReceivers};
pub use error::BoardError;
pub use sink::{BroadcastSink, OutgoingKind};
