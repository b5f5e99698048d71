//! Core domain models for the chat application.

use serde::{Deserialize, Serialize};

use super::{
    resolver::canonical_pair,
    value_object::{MessageId, MessageText, RoomKey, Timestamp, UserId, UserName},
};

/// A registered user. Rooms and messages refer to users by id only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: UserName,
    pub created_at: Timestamp,
}

impl User {
    pub fn new(id: UserId, name: UserName, created_at: Timestamp) -> Self {
        Self {
            id,
            name,
            created_at,
        }
    }
}

/// A persisted chat message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message identifier assigned by the message store
    pub id: MessageId,
    /// Sender's user ID
    pub sender_id: UserId,
    /// Receiver's user ID
    pub receiver_id: UserId,
    /// Message body
    pub text: MessageText,
    /// Timestamp when the message was persisted
    pub created_at: Timestamp,
}

impl Message {
    /// Create a new message
    pub fn new(
        id: MessageId,
        sender_id: UserId,
        receiver_id: UserId,
        text: MessageText,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            sender_id,
            receiver_id,
            text,
            created_at,
        }
    }
}

/// Represents a two-party room with its ordered message references
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Canonical room key
    pub key: RoomKey,
    /// The two participants, stored in canonical (lexicographic) order
    pub participants: [UserId; 2],
    /// Message ids in chronological (insertion) order
    pub message_ids: Vec<MessageId>,
    /// Timestamp when the room was created
    pub created_at: Timestamp,
}

impl Room {
    /// Create a new empty room. The participants are stored canonically
    /// whatever order they are passed in.
    pub fn new(key: RoomKey, a: UserId, b: UserId, created_at: Timestamp) -> Self {
        let participants = {
            let (first, second) = canonical_pair(&a, &b);
            [first.clone(), second.clone()]
        };
        Self {
            key,
            participants,
            message_ids: Vec::new(),
            created_at,
        }
    }

    /// Append a message reference to the end of the history
    pub fn append_message(&mut self, message_id: MessageId) {
        self.message_ids.push(message_id);
    }

    /// Whether `(sender, receiver)` is a permutation of the participants
    pub fn is_between(&self, sender: &UserId, receiver: &UserId) -> bool {
        let (first, second) = canonical_pair(sender, receiver);
        &self.participants[0] == first && &self.participants[1] == second
    }
}
