use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, ServerConfig, StorageConfig, StorageKind};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};
use service::{
    runtime,
    storage::{InMemoryBackend, JsonFileBackend, StorageBackend},
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("{}:{}: {e}", server.host, server.port)))
}

/// Open the configured backend and wire both collection stores onto it.
pub async fn build_state(storage: &StorageConfig) -> Result<ServerState, StartupError> {
    let backend: Arc<dyn StorageBackend> = match storage.backend {
        StorageKind::File => {
            runtime::ensure_env(&storage.data_dir).await?;
            let backend = JsonFileBackend::new(&storage.data_dir).await?;
            info!(data_dir = %backend.data_dir().display(), "using JSON file storage");
            backend as Arc<dyn StorageBackend>
        }
        StorageKind::Memory => {
            warn!("using in-memory storage; data is lost on exit");
            InMemoryBackend::new() as Arc<dyn StorageBackend>
        }
    };
    Ok(ServerState::new(backend))
}

/// Build the app from `cfg` and serve until the listener fails.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg.storage).await?;
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting blog api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
