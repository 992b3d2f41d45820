//! API Middleware modules
//!
//! Provides rate limiting for the `/init` and `/dkg` routes.

pub mod rate_limit;

pub use rate_limit::{rate_limit, RateLimitConfig, RateLimiter};
