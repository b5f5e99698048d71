//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! find-or-create と追記は書き込みロックを取ったまま 1 回の操作で行うため、
//! 同じキーへの同時アクセスでも Room が重複したり、メッセージが失われたりしません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    MessageId, RepositoryError, Room, RoomKey, RoomRepository, Timestamp, UserId,
};

/// インメモリ Room Repository 実装
///
/// ドメイン層の RoomRepository trait を実装します（依存性の逆転）。
#[derive(Clone, Default)]
pub struct InMemoryRoomRepository {
    /// ルームキー → Room
    rooms: Arc<RwLock<HashMap<RoomKey, Room>>>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存されている Room の数
    pub async fn count_rooms(&self) -> usize {
        self.rooms.read().await.len()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn find_by_key(&self, key: &RoomKey) -> Result<Option<Room>, RepositoryError> {
        let rooms = self.rooms.read().await;
        Ok(rooms.get(key).cloned())
    }

    async fn create_if_absent(
        &self,
        key: RoomKey,
        participants: [UserId; 2],
    ) -> Result<Room, RepositoryError> {
        let mut rooms = self.rooms.write().await;
        let room = rooms.entry(key.clone()).or_insert_with(|| {
            let [a, b] = participants;
            tracing::debug!("Creating room '{}'", key);
            Room::new(key, a, b, Timestamp::now())
        });
        Ok(room.clone())
    }

    async fn append_message(
        &self,
        key: &RoomKey,
        message_id: MessageId,
    ) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.write().await;
        let room = rooms
            .get_mut(key)
            .ok_or_else(|| RepositoryError::RoomNotFound(key.as_str().to_string()))?;
        room.append_message(message_id);
        Ok(())
    }
}
