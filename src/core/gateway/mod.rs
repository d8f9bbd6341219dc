//! API gateway
//!
//! Assembles the request pipeline in front of the application routes:
//!
//! 1. security headers
//! 2. CORS from the configured allow-list
//! 3. rate limiting below the auth prefix
//! 4. JSON body limit
//! 5. routes nested under the API prefix
//! 6. terminal error handling (errors and panics become JSON responses)

pub mod cors;
pub mod error;
pub mod rate_limiter;
pub mod security_headers;

use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit, middleware};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;

use crate::core::config::{API_PREFIX, AUTH_PREFIX, Config};

pub use error::{ApiJson, GatewayError};
pub use rate_limiter::{AuthRateLimiter, FixedWindowLimiter};

/// Create the auth limiter described by `config`
pub fn auth_rate_limiter(config: &Config) -> Arc<AuthRateLimiter> {
    Arc::new(AuthRateLimiter::new(
        AUTH_PREFIX,
        FixedWindowLimiter::new(config.auth_rate_max, config.auth_rate_window),
        config.trust_proxy,
    ))
}

/// Mount `routes` under the API prefix and wrap them in the gateway pipeline.
///
/// `routes` paths are relative to the prefix (`/auth/login`, not
/// `/api/auth/login`). Unmatched paths below the prefix answer with a JSON 404.
pub fn build(config: &Config, routes: Router, limiter: Arc<AuthRateLimiter>) -> Router {
    let api = routes.fallback(error::not_found);

    Router::new().nest(API_PREFIX, api).layer(
        ServiceBuilder::new()
            .layer(middleware::from_fn(security_headers::security_headers))
            .layer(cors::cors_layer(&config.allowed_origins))
            .layer(middleware::from_fn_with_state(
                limiter,
                rate_limiter::rate_limit,
            ))
            .layer(DefaultBodyLimit::max(config.json_body_limit))
            .layer(CatchPanicLayer::custom(error::handle_panic)),
    )
}
