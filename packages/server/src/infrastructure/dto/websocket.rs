//! WebSocket message DTOs for the chat application.

use serde::{Deserialize, Serialize};

use super::http::MessageDto;
use crate::domain::Message;

/// Event type enum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageType {
    NewMessage,
}

/// Event pushed to every listener when a message has been sent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessageEvent {
    pub r#type: MessageType,
    pub payload: MessageDto,
}

impl NewMessageEvent {
    pub fn new(message: &Message) -> Self {
        Self {
            r#type: MessageType::NewMessage,
            payload: MessageDto::from(message),
        }
    }
}
