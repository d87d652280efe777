//! Gateway endpoint handlers.
//!
//! The webhook handler makes one decision per request: is the caller's
//! address inside a trusted range? Trusted callers are relayed downstream
//! and receive the downstream outcome; everyone else gets an explicit 403.
//! Every error path maps to an explicit response, so one bad request never
//! crashes the process or disturbs the installed range set.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{ConnectInfo, RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::RelayError;
use crate::filter::RangeGuard;
use crate::relay::RelayClient;
use crate::web::client_ip::caller_address;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub guard: Arc<RangeGuard>,
    pub relay: RelayClient,
}

impl AppState {
    pub fn new(config: Config, guard: Arc<RangeGuard>, relay: RelayClient) -> Self {
        Self {
            config: Arc::new(config),
            guard,
            relay,
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub trusted_ranges: usize,
}

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        trusted_ranges: state.guard.snapshot().len(),
    })
}

// =============================================================================
// Webhook Gate
// =============================================================================

/// Gateway response body.
#[derive(Serialize)]
pub struct GateResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downstream_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downstream_body: Option<String>,
}

impl GateResponse {
    fn bare(status: &'static str) -> Self {
        Self {
            status,
            downstream_status: None,
            downstream_body: None,
        }
    }
}

/// Webhook gate endpoint.
///
/// This endpoint:
/// 1. Resolves the caller address (forwarded header or peer)
/// 2. Checks it against the current trusted-range set
/// 3. Relays trusted requests downstream and returns the outcome
pub async fn webhook(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let caller = caller_address(&headers, peer, state.config.trust_forwarded_header);

    info!(
        caller = %caller,
        peer = %peer,
        body_length = body.len(),
        "webhook_received"
    );

    if !state.guard.is_member_str(&caller) {
        warn!(caller = %caller, "webhook_denied");
        return (StatusCode::FORBIDDEN, Json(GateResponse::bare("denied")));
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/json");

    match state
        .relay
        .forward(query.as_deref(), content_type, body)
        .await
    {
        Ok(outcome) => {
            info!(
                caller = %caller,
                downstream_status = outcome.status.as_u16(),
                "webhook_relayed"
            );
            (
                StatusCode::OK,
                Json(GateResponse {
                    status: "relayed",
                    downstream_status: Some(outcome.status.as_u16()),
                    downstream_body: Some(outcome.body),
                }),
            )
        }
        Err(RelayError::Status(status)) => {
            error!(
                caller = %caller,
                downstream_status = status.as_u16(),
                "webhook_relay_rejected"
            );
            (
                StatusCode::BAD_GATEWAY,
                Json(GateResponse {
                    status: "relay_failed",
                    downstream_status: Some(status.as_u16()),
                    downstream_body: None,
                }),
            )
        }
        Err(e) => {
            error!(caller = %caller, error = %e, "webhook_relay_failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(GateResponse::bare("relay_failed")),
            )
        }
    }
}
