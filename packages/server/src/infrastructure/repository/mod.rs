//! ストア実装
//!
//! ドメイン層の UserRepository / RoomRepository / MessageRepository を実装します。
//! 現在はインメモリ実装のみで、外部 DB を使う実装もこの下に並べる想定です。

pub mod inmemory;

pub use inmemory::{InMemoryMessageRepository, InMemoryRoomRepository, InMemoryUserRepository};
