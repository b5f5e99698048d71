//! Broadcast channel port.

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use super::{entity::Message, value_object::ListenerId};

/// Errors related to listener registration
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum BroadcastError {
    #[error("listener '{0}' is already connected")]
    DuplicateListener(String),

    #[error("listener '{0}' is not connected")]
    ListenerNotFound(String),
}

/// Set of live listeners that receive every newly sent message.
///
/// Payloads are pushed as serialized text frames through the listener's
/// unbounded sender, so publishing never waits on a slow listener.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BroadcastChannel: Send + Sync {
    /// Register a listener. Only messages published afterwards reach it.
    async fn connect(
        &self,
        listener_id: ListenerId,
        sender: UnboundedSender<String>,
    ) -> Result<(), BroadcastError>;

    /// Unregister a listener.
    async fn disconnect(&self, listener_id: &ListenerId) -> Result<(), BroadcastError>;

    /// Push a `newMessage` event to every registered listener.
    ///
    /// Best effort: failures are handled per listener and never returned.
    /// Returns the number of listeners the event was handed to.
    async fn publish(&self, message: &Message) -> usize;

    /// Number of currently registered listeners.
    async fn count_listeners(&self) -> usize;
}
