//! Repository traits (ports) for the durable store.
//!
//! The domain defines the contracts; `infrastructure::repository` provides
//! implementations. The atomicity requirements below are part of the contract:
//! use cases hold no locks of their own and rely on them.

use async_trait::async_trait;

use super::{
    entity::{Message, Room, User},
    error::RepositoryError,
    value_object::{MessageId, MessageText, RoomKey, UserId, UserName},
};

/// User account storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Register a user, assigning id and creation timestamp.
    async fn create(&self, name: UserName) -> Result<User, RepositoryError>;

    /// Look up a user. `Ok(None)` when absent.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;

    /// All users in registration order.
    async fn list(&self) -> Result<Vec<User>, RepositoryError>;
}

/// Two-party room storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Look up a room by key. `Ok(None)` when absent.
    async fn find_by_key(&self, key: &RoomKey) -> Result<Option<Room>, RepositoryError>;

    /// Atomic find-or-insert on `key`.
    ///
    /// Concurrent callers racing on the same key all get the same room back.
    /// An existing room is returned unchanged, including its participants.
    async fn create_if_absent(
        &self,
        key: RoomKey,
        participants: [UserId; 2],
    ) -> Result<Room, RepositoryError>;

    /// Atomic append of `message_id` to the room's history.
    ///
    /// Concurrent appends to the same room are all kept, in the order the
    /// store applies them.
    ///
    /// # Errors
    ///
    /// `RepositoryError::RoomNotFound` if no room exists for `key`.
    async fn append_message(
        &self,
        key: &RoomKey,
        message_id: MessageId,
    ) -> Result<(), RepositoryError>;
}

/// Append-only message storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Persist a new message, assigning id and creation timestamp.
    async fn create(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
        text: MessageText,
    ) -> Result<Message, RepositoryError>;

    /// Look up a message. `Ok(None)` when absent.
    async fn find_by_id(&self, id: &MessageId) -> Result<Option<Message>, RepositoryError>;

    /// Fetch messages in the order of `ids`, not in storage order.
    /// Unknown ids are skipped.
    async fn find_many_by_ids(&self, ids: &[MessageId]) -> Result<Vec<Message>, RepositoryError>;
}
