//! VINDYAA Billing - API Server Binary
//!
//! This binary starts the HTTP API server for the academy's billing views.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin vindyaa-billing
//!
//! # Run with environment variables
//! VINDYAA_PORT=9000 VINDYAA_BILLING__WINDOW_MONTHS=12 cargo run --bin vindyaa-billing
//! ```
//!
//! # Environment Variables
//!
//! * `VINDYAA_HOST` - Server host (default: 0.0.0.0)
//! * `VINDYAA_PORT` - Server port (default: 8080)
//! * `VINDYAA_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `VINDYAA_SIMULATED_LATENCY_MS` - Delay added to every roster read (default: 0)
//! * `VINDYAA_BILLING__WINDOW_MONTHS` - Months of invoices per student (default: 7)
//! * `VINDYAA_BILLING__DUE_AFTER_DAYS` - Days from invoice date to due date (default: 15)
//! * `VINDYAA_BILLING__DEFAULT_TUITION_FEE` - Fee for courses not in the schedule (default: 2000)
//! * `VINDYAA_BILLING__STATUS_HEURISTIC` - `elapsed_months` or `calendar_month_index`

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use core_kernel::SystemClock;
use domain_billing::{BillingService, InMemoryBillingStore, InvoiceSynthesizer};
use domain_student::InMemoryStudentRoster;
use interface_api::{config::ApiConfig, create_router, AppState};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, builds the billing service
/// over the sample roster, and starts the HTTP server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = load_config()?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        window_months = config.billing.window_months,
        heuristic = ?config.billing.status_heuristic,
        "Starting VINDYAA billing API server"
    );

    let roster = Arc::new(
        InMemoryStudentRoster::sample()
            .with_latency(Duration::from_millis(config.simulated_latency_ms)),
    );
    let synthesizer = InvoiceSynthesizer::new(&config.billing, Arc::new(SystemClock))
        .context("invalid billing configuration")?;
    let billing = Arc::new(
        BillingService::new(roster.clone(), Arc::new(InMemoryBillingStore::new()), synthesizer)
            .with_currency(config.billing.currency),
    );

    let app = create_router(AppState::new(billing, roster, config.clone()));

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads and validates configuration from the environment.
fn load_config() -> anyhow::Result<ApiConfig> {
    let config = ApiConfig::from_env().context("failed to read VINDYAA_* configuration")?;
    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
