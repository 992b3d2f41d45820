//! Shared application state for the API server

use std::sync::Arc;

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    /// The per-operator ceremony registry this server fronts.
    pub switch: Arc<dkg_switch::Switch>,
}

impl AppState {
    /// Create new application state
    pub fn new(switch: Arc<dkg_switch::Switch>) -> Self {
        Self { switch }
    }
}

impl Default for AppState {
    fn default() -> Self {
        // This is only for testing purposes and should never be used in production
        // It will panic if any of the fields are accessed
        panic!("AppState::default() should not be used in production. Create proper instances with AppState::new()")
    }
}
