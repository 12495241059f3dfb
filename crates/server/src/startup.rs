use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::grids::AppState;
use crate::routes;
use service::{
    grid::{GridService, GridStore},
    runtime,
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))
}

/// Open the configured collection and wire the grid service over it.
pub async fn build_state(cfg: &AppConfig) -> Result<AppState, StartupError> {
    let collection = runtime::open_collection(cfg)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;
    Ok(AppState::new(GridService::new(GridStore::new(collection))))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "ctrl_c listener failed; serving until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Serve the grid API for an already loaded config until Ctrl+C.
/// In-flight requests finish; completed store writes are never rolled back.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    runtime::ensure_env(&cfg.server.static_dir, "").await?;

    let state = build_state(&cfg).await?;
    let app: Router = routes::build_router(state, build_cors(), &cfg.server.static_dir);

    let addr = bind_addr(&cfg)?;
    info!(%addr, backend = ?cfg.store.backend, "starting grid server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("grid server stopped");
    Ok(())
}
