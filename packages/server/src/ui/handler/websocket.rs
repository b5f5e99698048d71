//! WebSocket connection handlers.
//!
//! Each connection is a broadcast listener: it is registered before the
//! upgrade completes and unregistered when either side closes.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ListenerId, ListenerIdFactory},
    ui::state::AppState,
    usecase::{ConnectError, ConnectListenerUseCase, DisconnectListenerUseCase},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, StatusCode> {
    let listener_id = ListenerIdFactory::generate();

    // Create a channel for this listener to receive events
    let (tx, rx) = mpsc::unbounded_channel();

    let connect_usecase = ConnectListenerUseCase::new(state.context.clone());
    match connect_usecase.execute(listener_id.clone(), tx).await {
        Ok(()) => Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, listener_id, rx))),
        Err(ConnectError::DuplicateListener(id)) => {
            tracing::warn!("Listener '{}' is already connected. Rejecting connection.", id);
            Err(StatusCode::CONFLICT)
        }
    }
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    listener_id: ListenerId,
    mut rx: mpsc::UnboundedReceiver<String>,
) {
    let (mut sender, mut receiver) = socket.split();
    let listener_label = listener_id.to_string();

    // Listeners only receive; inbound frames are drained until close
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => {
                    tracing::info!("Listener '{}' requested close", listener_label);
                    break;
                }
                Ok(Message::Text(text)) => {
                    tracing::debug!(
                        "Ignoring inbound text from listener '{}' ({} bytes)",
                        listener_label,
                        text.as_str().len()
                    );
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            }
        }
    });

    // Forward broadcast events to this listener
    let mut send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if sender.send(Message::Text(event.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    let disconnect_usecase = DisconnectListenerUseCase::new(state.context.clone());
    if let Err(e) = disconnect_usecase.execute(&listener_id).await {
        // Already pruned by a publish that found the channel closed
        tracing::debug!("Listener '{}' was already removed: {}", listener_id, e);
    }
}
