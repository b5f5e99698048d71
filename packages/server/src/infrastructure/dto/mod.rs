//! Data transfer objects for the HTTP and WebSocket wire formats.

pub mod http;
pub mod websocket;
