//! Heartline Admin Server - Main Entry Point

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use hl_admin::{api, audit::AuditLog, config, dashboard::Dashboard, session};

/// How often expired sessions are swept.
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hl_admin=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        default_role = %config.default_role,
        "Starting Heartline Admin"
    );

    // Audit sink
    let audit = AuditLog::from_config(&config.audit)?;
    info!(transport = audit.transport_name(), "Audit sink ready");

    // Build application state
    let state = api::AppState::new(config.clone(), Dashboard::seeded(audit));
    session::spawn_session_sweeper(state.sessions.clone(), SESSION_SWEEP_INTERVAL);

    // Build router
    let app = api::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!(address = %config.bind_address, "Server listening");

    // Graceful shutdown handler
    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
        info!("Received shutdown signal, cleaning up...");
    };

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal)
    .await?;

    info!("Server shutdown complete");

    Ok(())
}
