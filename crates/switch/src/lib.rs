//! Per-operator ceremony multiplexer: registry, authenticated entry point,
//! concurrency cap, and idle eviction. The HTTP surface (`dkg-api`) is a
//! thin layer over `Switch::init_instance`/`process_message`.

pub mod error;
pub mod http_sink;
pub mod registry;

pub use error::SwitchError;
pub use http_sink::{HttpBroadcastSink, Peer};
pub use registry::{Switch, SwitchLimits};
