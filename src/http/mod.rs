pub mod handlers;
pub mod middleware;
pub mod render;

use crate::core::board::ParkingBoard;
use crate::core::LotRepository;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

pub type AppState<R> = Arc<ParkingBoard<R>>;

pub fn build_router<R: LotRepository + 'static>(state: AppState<R>) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard_handler::<R>))
        .route("/health", get(handlers::health_handler))
        .route("/parking/:lot_id/", get(handlers::detail_handler::<R>))
        .route("/parking/:lot_id", get(handlers::detail_handler::<R>))
        .route("/api/parking/:lot_id/", get(handlers::summary_handler::<R>))
        .route("/api/parking/:lot_id", get(handlers::summary_handler::<R>))
        .layer(axum::middleware::from_fn(
            middleware::request_tracing_middleware,
        ))
        .with_state(state)
}

/// Serves until SIGINT/SIGTERM.
pub async fn serve(listener: TcpListener, router: Router) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("🚗 parking-board listening on http://{}", addr);
    }
    axum::serve(listener, router)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => tracing::info!("SIGTERM received, shutting down"),
                    _ = sigint.recv() => tracing::info!("SIGINT received, shutting down"),
                }
            }
            _ => {
                tracing::warn!("Could not register signal handlers, falling back to ctrl-c");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("Ctrl-C received, shutting down");
    }
}
