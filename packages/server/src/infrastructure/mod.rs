//! Infrastructure layer: concrete stores, the broadcast channel and wire DTOs.

pub mod broadcast;
pub mod dto;
pub mod repository;

use std::sync::Arc;

pub use broadcast::InMemoryBroadcastChannel;
pub use repository::{InMemoryMessageRepository, InMemoryRoomRepository, InMemoryUserRepository};

use crate::usecase::ChatContext;

/// Build a context backed entirely by in-memory stores.
pub fn in_memory_context() -> ChatContext {
    ChatContext::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryRoomRepository::new()),
        Arc::new(InMemoryMessageRepository::new()),
        Arc::new(InMemoryBroadcastChannel::new()),
    )
}
