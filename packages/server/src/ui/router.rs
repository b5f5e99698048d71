//! HTTP routes.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use super::{
    handler::{
        create_user, get_room_detail, get_room_messages, health_check, list_users, send_message,
        websocket_handler,
    },
    state::AppState,
};

/// Build the application router
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/messages", post(send_message))
        .route("/api/rooms/{room_key}", get(get_room_detail))
        .route("/api/rooms/{room_key}/messages", get(get_room_messages))
        .route("/ws", get(websocket_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
