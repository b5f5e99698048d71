//! InMemory Repository 実装
//!
//! HashMap をインメモリ DB として使用します。各操作は単一のロック区間で完結するため、
//! find-or-create と追記はストア側でアトミックに実行されます。

mod message;
mod room;
mod user;

pub use message::InMemoryMessageRepository;
pub use room::InMemoryRoomRepository;
pub use user::InMemoryUserRepository;
