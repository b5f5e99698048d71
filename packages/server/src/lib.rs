//! Two-party real-time chat server library.
//!
//! Messages between two users are grouped into a room whose key is derived
//! from the pair, persisted, and broadcast to every connected WebSocket
//! listener.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use ui::run as run_server;
