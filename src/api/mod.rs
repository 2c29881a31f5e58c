pub mod rest;

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use crate::api::rest::{create_router, ApiState};
use crate::error::Result;

/// Serves the ops API until `shutdown` is cancelled.
pub async fn serve(bind_addr: &str, state: Arc<ApiState>, shutdown: CancellationToken) -> Result<()> {
    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("Ops API listening on {}", listener.local_addr()?);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    tracing::info!("Ops API stopped");
    Ok(())
}
