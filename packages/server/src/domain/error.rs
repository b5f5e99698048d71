//! Domain layer error definitions.

use std::time::Duration;

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// UserId validation error
    #[error("UserId cannot be empty")]
    UserIdEmpty,

    /// UserId too long error
    #[error("UserId cannot exceed {max} characters (got {actual})")]
    UserIdTooLong { max: usize, actual: usize },

    /// UserId contains the room key separator
    #[error("UserId cannot contain '{separator}' (got: {id})")]
    UserIdContainsSeparator { separator: char, id: String },

    /// UserName validation error
    #[error("UserName cannot be empty")]
    UserNameEmpty,

    /// UserName too long error
    #[error("UserName cannot exceed {max} characters (got {actual})")]
    UserNameTooLong { max: usize, actual: usize },

    /// MessageId validation error
    #[error("MessageId cannot be empty")]
    MessageIdEmpty,

    /// MessageText validation error
    #[error("MessageText cannot be empty")]
    MessageTextEmpty,

    /// MessageText too long error
    #[error("MessageText cannot exceed {max} characters (got {actual})")]
    MessageTextTooLong { max: usize, actual: usize },

    /// RoomKey validation error
    #[error("RoomKey cannot be empty")]
    RoomKeyEmpty,

    /// ListenerId validation error
    #[error("ListenerId cannot be empty")]
    ListenerIdEmpty,
}

/// Errors raised by durable store implementations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The store could not be reached or rejected the operation
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The caller-supplied deadline expired before the store answered
    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),

    /// A uniqueness constraint other than the room key was violated
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Append targeted a room that does not exist
    #[error("room not found: {0}")]
    RoomNotFound(String),
}
