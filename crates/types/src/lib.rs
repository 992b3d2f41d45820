//! Shared data model for the DKG ceremony system.
//!
//! No cryptography and no I/O lives here — just the structs and invariants
//! that every other crate in this workspace agrees on.

pub mod ceremony;
pub mod error;
pub mod exchange;
pub mod init;
pub mod network;
pub mod operator;
pub mod output;
pub mod request;

pub use ceremony::CeremonyState;
pub use error::TypesError;
pub use exchange::ExchangeEntry;
pub use init::InitMessage;
pub use network::EthNetwork;
pub use operator::{Operator, OperatorId};
pub use output::Output;
pub use request::RequestId;

/// Maximum concurrently tracked ceremony instances per `Switch`.
pub const MAX_INSTANCES: usize = 1024;

/// Idle eviction window for a ceremony instance that has not progressed.
pub const INSTANCE_IDLE_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5 * 60);
