//! HTTP API request/response DTOs for the chat application.

use duet_shared::time::timestamp_to_jst_rfc3339;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{Message, Room, User},
    usecase::SendMessageCommand,
};

/// Request body for user registration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    /// Older clients send `username`; `name` wins when both are present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl CreateUserRequest {
    pub fn into_name(self) -> Option<String> {
        self.name.or(self.username)
    }
}

/// Registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub created_at: String, // ISO 8601
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.as_str().to_string(),
            name: user.name.as_str().to_string(),
            created_at: timestamp_to_jst_rfc3339(user.created_at.value()),
        }
    }
}

/// Request body for sending a message.
///
/// Every field is optional on the wire so that a missing field reaches the
/// use case and is reported as a bad request rather than a decode failure.
/// The camelCase names (`senderId`, `receiverId`, `message`) are accepted as
/// fallbacks; the snake_case field wins when a body carries both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub receiver_id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, rename = "senderId", skip_serializing_if = "Option::is_none")]
    pub legacy_sender_id: Option<String>,
    #[serde(default, rename = "receiverId", skip_serializing_if = "Option::is_none")]
    pub legacy_receiver_id: Option<String>,
    #[serde(default, rename = "message", skip_serializing_if = "Option::is_none")]
    pub legacy_text: Option<String>,
}

impl From<SendMessageRequest> for SendMessageCommand {
    fn from(request: SendMessageRequest) -> Self {
        Self {
            sender_id: request.sender_id.or(request.legacy_sender_id),
            receiver_id: request.receiver_id.or(request.legacy_receiver_id),
            text: request.text.or(request.legacy_text),
        }
    }
}

/// Persisted message, used by both HTTP responses and WebSocket events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDto {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub text: String,
    pub created_at: String, // ISO 8601
}

impl From<&Message> for MessageDto {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.as_str().to_string(),
            sender_id: message.sender_id.as_str().to_string(),
            receiver_id: message.receiver_id.as_str().to_string(),
            text: message.text.as_str().to_string(),
            created_at: timestamp_to_jst_rfc3339(message.created_at.value()),
        }
    }
}

/// Room detail for detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub key: String,
    pub participants: Vec<String>,
    pub message_count: usize,
    pub created_at: String, // ISO 8601
}

impl From<&Room> for RoomDetailDto {
    fn from(room: &Room) -> Self {
        Self {
            key: room.key.as_str().to_string(),
            participants: room
                .participants
                .iter()
                .map(|id| id.as_str().to_string())
                .collect(),
            message_count: room.message_ids.len(),
            created_at: timestamp_to_jst_rfc3339(room.created_at.value()),
        }
    }
}

/// Error body returned for every failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    /// Error kind, e.g. `not_found`
    pub error: String,
    pub detail: String,
    /// Persisted message on a partial failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<MessageDto>,
}
