use std::future::Future;
use std::sync::Arc;

use axum::Router;
use configs::{AppConfig, StoreConfig};
use service::lists::ListService;
use service::storage::{KvStore, MemoryKvStore};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes;
use crate::state::ServerState;

pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wrap `store` in the shared state. Flushes it when configured, otherwise
/// keeps its entries and allocates keys after the highest one present.
pub async fn build_state(store: Arc<dyn KvStore>, store_cfg: &StoreConfig) -> anyhow::Result<ServerState> {
    if store_cfg.flush_on_start {
        let state = ServerState::new(store);
        state.lists.reset().await?;
        return Ok(state);
    }
    warn!("store.flush_on_start disabled; keeping existing entries");
    let lists = ListService::resume(store).await?;
    Ok(ServerState::from_service(lists))
}

/// Resolves on Ctrl+C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C; running until killed");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
}

/// Serve `app` on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(Arc::new(MemoryKvStore::new()), &cfg.store).await?;
    let app = routes::build_router(state, build_cors());

    // Bind and serve
    let listener = TcpListener::bind(cfg.bind_addr()).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "starting list store server");
    serve(listener, app, shutdown_signal()).await
}
