//! pass-in attendee HTTP server.

use pass_in_postgres::PostgresAttendeeStore;
use pass_in_server::{AppState, Config, build_router};
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine; real deployments set the environment directly
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pass_in_server=info,pass_in_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting pass-in attendee server");

    let config = Config::from_env();
    info!(
        host = %config.server.host,
        port = config.server.port,
        max_connections = config.postgres.max_connections,
        cors_origin = %config.server.cors_origin,
        "Configuration loaded"
    );

    info!("Connecting to attendee database...");
    let pool = config.postgres.pool_options().connect(&config.postgres.url).await?;
    let store = Arc::new(PostgresAttendeeStore::from_pool(pool));
    info!("Attendee database connected");

    let app = build_router(AppState::new(store), &config.server.cors_origin);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM.
#[allow(clippy::expect_used)] // Without signal handlers the server cannot stop cleanly
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
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
