//! Contact Form API
//!
//! A REST server that stores contact-form submissions and hire requests and
//! emails the site owner about each one.

use anyhow::Context;
use contact_form_api::{api, config::Config, notifier::Notifier, state::AppState, store::Store};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    let store = Store::new(&config.database.url, config.database.max_connections)
        .await
        .context("Failed to open submission database")?;
    let (notifier, delivery_worker) =
        Notifier::from_config(&config.email).context("Failed to configure email transport")?;
    info!(
        recipient = notifier.recipient(),
        delivery = ?config.email.delivery,
        "Owner notifications enabled"
    );

    let app = api::router(AppState::new(store, notifier));

    // Bind to address from config
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid server address: {}", e))?;

    info!("Server running on http://{}", addr);
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Setup graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router (and its notifier) is gone; let queued emails drain
    if let Some(worker) = delivery_worker {
        info!("Waiting for queued emails to be delivered...");
        if let Err(e) = worker.await {
            tracing::warn!(error = %e, "Email delivery worker ended abnormally");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Handle graceful shutdown signals (Ctrl+C, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}
