use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Resolves on Ctrl+C; never resolves if the signal handler cannot be installed.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(service = "server", event = "signal_handler_failed", error = %e, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!(service = "server", event = "shutdown_signal", "received Ctrl+C, shutting down");
}

/// Connect storage, make sure the schema exists and build the app.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    if let Some(path) = cfg.database.sqlite_path() {
        common::env::ensure_parent_dir(&path).await?;
    }
    let db = models::db::connect_with_config(&cfg.database).await?;
    models::db::ensure_schema(&db).await?;

    if cfg.auth.uses_default_token() {
        warn!(service = "server", event = "default_access_token", "ACCESS_TOKEN not set; using the built-in default token");
    }
    let state = ServerState::new(db, cfg.auth.access_token.clone());
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: build the app and serve until Ctrl+C
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let listener = tokio::net::TcpListener::bind(cfg.server.bind_addr()).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "starting result store");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
