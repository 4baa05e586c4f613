use std::sync::Arc;

use clap::Parser;
use feedbackd::config::{Cli, Config};
use feedbackd::db::Database;
use feedbackd::handler::AppState;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Cli::parse();
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    tracing::info!("feedbackd.svc starting");
    if let Ok(path) = dotenv {
        tracing::info!(path = ?path, "loaded environment file");
    }

    let cfg = match &args.config_path {
        Some(path) => Config::new(path),
        None => Config::from_env(),
    }
    .unwrap_or_else(|e| {
        tracing::error!(error = %e, path = ?args.config_path, "failed to load config");
        std::process::exit(1);
    });

    let db = Arc::new(Database::new(&cfg.storage).await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to setup database");
        std::process::exit(1);
    }));
    tracing::info!(database = cfg.storage.get_db(), "connected to database");

    let cors = feedbackd::cors_layer(&cfg.app).unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to setup cors");
        std::process::exit(1);
    });

    let app = feedbackd::app(AppState { db }, cors);
    let address = format!("0.0.0.0:{}", cfg.app.get_port());

    let listener = tokio::net::TcpListener::bind(&address).await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to setup tcp listener");
        std::process::exit(1);
    });

    tracing::info!("feedbackd.svc running on {}", &address);
    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %err, "server exited with error");
        std::process::exit(1);
    }

    tracing::info!("feedbackd.svc going off, graceful shutdown complete");
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl+c");
        std::future::pending::<()>().await;
    }
    tracing::info!("ctrl+c signal received, preparing to shutdown");
}
