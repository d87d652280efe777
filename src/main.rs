//! HookGate - trusted-range webhook gateway.
//!
//! Receives webhook notifications, checks the caller's address against a
//! periodically refreshed set of trusted CIDR ranges, and relays accepted
//! requests to the downstream automation endpoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hookgate::filter::RangeGuard;
use hookgate::ranges::{refresh_once, run_refresh_loop, RangeSource};
use hookgate::relay::RelayClient;
use hookgate::web::{router, AppState};
use hookgate::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("gateway_starting");

    // Load configuration
    let config = Config::from_env();
    info!(
        port = config.port,
        ranges_url = %config.ranges_url,
        downstream_url = %config.downstream_url,
        refresh_interval_secs = config.refresh_interval_secs,
        trust_forwarded_header = config.trust_forwarded_header,
        "config_loaded"
    );

    let fetch_client = reqwest::Client::builder()
        .timeout(Duration::from_millis(config.fetch_timeout_ms))
        .build()
        .context("Failed to create directory fetch client")?;

    let relay_client = reqwest::Client::builder()
        .timeout(Duration::from_millis(config.relay_timeout_ms))
        .build()
        .context("Failed to create relay client")?;

    let downstream_url =
        url::Url::parse(&config.downstream_url).context("Invalid DOWNSTREAM_URL")?;

    let guard = Arc::new(RangeGuard::new());
    let source = RangeSource::new(fetch_client, config.ranges_url.clone());
    let relay = RelayClient::new(relay_client, downstream_url);

    // Populate the trusted set before accepting traffic. If this fails the
    // empty deny-all set stays in place until the next scheduled refresh.
    refresh_once(&source, &guard).await;

    let period = Duration::from_secs(config.refresh_interval_secs);
    tokio::spawn(run_refresh_loop(source, Arc::clone(&guard), period));

    // Create application state and router
    let state = AppState::new(config.clone(), guard, relay);
    let app = router(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "gateway_listening");

    // Run server with graceful shutdown
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    info!("gateway_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("gateway_shutting_down");
}
