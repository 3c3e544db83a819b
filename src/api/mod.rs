pub mod handlers;
pub mod models;
pub mod routes;

use crate::lookup::RecipeLookup;
use crate::{Error, Result};
use handlers::AppState;
use std::future::Future;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Serve the API until `shutdown` resolves, then close the store.
///
/// In-flight requests finish before the connection is released.
pub async fn serve<F>(listener: TcpListener, lookup: RecipeLookup, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = routes::create_router(AppState {
        lookup: lookup.clone(),
    });

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| Error::Internal(format!("Server error: {e}")));

    info!("Shutting down...");
    lookup.close().await;
    result
}

/// Resolves on Ctrl+C
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
