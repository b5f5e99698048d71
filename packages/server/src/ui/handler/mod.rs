//! Axum handlers: REST endpoints for users, messages and rooms, plus the
//! `/ws` listener endpoint.

pub mod http;
pub mod websocket;

pub use http::{
    create_user, get_room_detail, get_room_messages, health_check, list_users, send_message,
};
pub use websocket::websocket_handler;
