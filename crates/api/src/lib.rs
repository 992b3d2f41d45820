//! HTTP surface for a single DKG operator.
//!
//! Two routes carry the ceremony wire protocol (`/init`, `/dkg`), each rate
//! limited per source IP, plus an ambient `/health` liveness check. Bodies
//! are the raw `SignedTransport` wire encoding, not JSON — only error
//! responses and `/health` are JSON.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use middleware::{rate_limit, RateLimitConfig, RateLimiter};
pub use state::AppState;

/// Per-route rate limit configuration, a deployment knob rather than a
/// protocol input. Defaults match the wire contract (5/min `/init`,
/// 500/min `/dkg`).
#[derive(Debug, Clone)]
pub struct ApiRateLimits {
    pub init: RateLimitConfig,
    pub dkg: RateLimitConfig,
}

impl Default for ApiRateLimits {
    fn default() -> Self {
        Self {
            init: RateLimitConfig::init_route(),
            dkg: RateLimitConfig::dkg_route(),
        }
    }
}

/// Create and configure the API router with all endpoints
pub fn create_router(state: AppState, rate_limits: ApiRateLimits) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let init_limiter = Arc::new(RateLimiter::new(rate_limits.init));
    let dkg_limiter = Arc::new(RateLimiter::new(rate_limits.dkg));

    let init_route = Router::new()
        .route("/init", post(routes::init::init))
        .route_layer(middleware::from_fn_with_state(init_limiter, rate_limit));

    let dkg_route = Router::new()
        .route("/dkg", post(routes::dkg::dkg))
        .route_layer(middleware::from_fn_with_state(dkg_limiter, rate_limit));

    Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(init_route)
        .merge(dkg_route)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Start the API server on the specified address
pub async fn start_server(
    state: AppState,
    addr: SocketAddr,
    rate_limits: ApiRateLimits,
) -> anyhow::Result<()> {
    let app = create_router(state, rate_limits);

    info!("starting dkg-api server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "AppState::default() should not be used in production")]
    fn test_default_panics() {
        let _state = AppState::default();
    }
}
