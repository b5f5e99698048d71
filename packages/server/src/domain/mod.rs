//! Domain layer for the chat application.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod broadcast;
pub mod entity;
pub mod error;
pub mod factory;
pub mod repository;
pub mod resolver;
pub mod value_object;

pub use broadcast::{BroadcastChannel, BroadcastError};
pub use entity::{Message, Room, User};
pub use error::{RepositoryError, ValueObjectError};
pub use factory::{ListenerIdFactory, MessageIdFactory, UserIdFactory};
pub use repository::{MessageRepository, RoomRepository, UserRepository};
pub use resolver::{ROOM_KEY_SEPARATOR, resolve_room_key};
pub use value_object::{
    ListenerId, MessageId, MessageText, RoomKey, Timestamp, UserId, UserName,
};
