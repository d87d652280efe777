//! Web server module for the gatekeeping endpoint.
//!
//! A thin axum front that:
//! - Resolves the caller's address (forwarded header or peer)
//! - Checks it against the current trusted-range set
//! - Relays accepted webhooks downstream, denies the rest with a 403

pub mod client_ip;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use client_ip::{caller_address, FORWARDED_HEADER};
pub use handlers::{health, webhook, AppState, GateResponse, HealthResponse};

/// Route configuration for the gateway.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/bitbucket-webhook", post(webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
