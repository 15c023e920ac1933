//! # Sales Command Center API Server
//!
//! Binary entry point for the HTTP service.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sales_analytics::AnalyticsEngine;
use sales_api::{AppState, Config, build_router, cors_layer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    tracing::info!(
        version = sales_api::VERSION,
        "Starting Sales Command Center API"
    );

    if config.data_path.is_file() {
        tracing::info!(path = %config.data_path.display(), "Serving sales data");
    } else {
        // Not fatal: the file may appear later and is read per request.
        tracing::warn!(
            path = %config.data_path.display(),
            "Sales data file not found; data endpoints will fail until it exists"
        );
    }

    let state = AppState::new(AnalyticsEngine::from_csv(&config.data_path));
    let app = build_router(state, cors_layer(&config.cors_origins));

    let addr = config.server_addr;
    tracing::info!(%addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
