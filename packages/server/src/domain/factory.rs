//! Domain factories for creating domain entities and value objects.

use super::{ListenerId, MessageId, UserId};

/// Factory for generating UserId instances.
///
/// Separates id generation from the validation logic in UserId.
pub struct UserIdFactory;

impl UserIdFactory {
    /// Generate a new UserId with a random UUID v4.
    pub fn generate() -> UserId {
        UserId::from_uuid(uuid::Uuid::new_v4())
    }
}

/// Factory for generating MessageId instances.
pub struct MessageIdFactory;

impl MessageIdFactory {
    /// Generate a new MessageId with a random UUID v4.
    pub fn generate() -> MessageId {
        MessageId::from_uuid(uuid::Uuid::new_v4())
    }
}

/// Factory for generating ListenerId instances.
pub struct ListenerIdFactory;

impl ListenerIdFactory {
    pub fn generate() -> ListenerId {
        ListenerId::from_uuid(uuid::Uuid::new_v4())
    }
}
