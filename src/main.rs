use anyhow::Context;
use tracing_subscriber::EnvFilter;

use classroom_api::config::config;
use classroom_api::database::Database;
use classroom_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL and friends
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config();
    tracing::info!("Starting Classroom API in {:?} mode", config.environment);

    let url = Database::url_from_env()?;
    let db = Database::connect(&url, &config.database)
        .await
        .context("failed to connect to database")?;
    db.migrate().await.context("failed to apply schema")?;

    // Allow tests or deployments to override port via env
    let port = std::env::var("CLASSROOM_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(8000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Classroom API listening on http://{}", bind_addr);

    axum::serve(listener, app(AppState::new(db.clone())))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
