//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。
//! 依存するストアとブロードキャストチャンネルは [`ChatContext`] で明示的に受け取ります。

pub mod connect_listener;
pub mod context;
pub mod disconnect_listener;
pub mod error;
pub mod get_room_messages;
pub mod list_users;
pub mod register_user;
pub mod send_message;

pub use connect_listener::ConnectListenerUseCase;
pub use context::ChatContext;
pub use disconnect_listener::DisconnectListenerUseCase;
pub use error::{
    ConnectError, DisconnectError, ErrorKind, GetRoomMessagesError, RegisterUserError,
    SendMessageError,
};
pub use get_room_messages::GetRoomMessagesUseCase;
pub use list_users::ListUsersUseCase;
pub use register_user::RegisterUserUseCase;
pub use send_message::{SendMessageCommand, SendMessageUseCase};
