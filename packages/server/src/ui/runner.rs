//! Server runner.

use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use super::{router::build_router, signal::shutdown_signal, state::AppState};
use crate::{config::ServerConfig, infrastructure::in_memory_context};

/// Errors that stop the server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Run the chat server until a shutdown signal is received.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let context = in_memory_context().with_store_timeout(config.store_timeout());
    let app = build_router(Arc::new(AppState::new(context)));

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;

    tracing::info!("Duet server listening on http://{}", addr);
    tracing::info!("WebSocket endpoint: ws://{}/ws", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    tracing::info!("Server stopped");
    Ok(())
}
