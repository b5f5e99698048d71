//! UseCase: Room のメッセージ履歴取得
//!
//! 配信パイプラインを通さず、Room ストアとメッセージストアを直接読みます。
//! 履歴の順序は Room が保持する ID の順序（送信順）で、ストアの保存順には依存しません。

use crate::domain::{Message, Room, RoomKey};

use super::{context::ChatContext, error::GetRoomMessagesError};

/// メッセージ履歴取得のユースケース
pub struct GetRoomMessagesUseCase {
    context: ChatContext,
}

impl GetRoomMessagesUseCase {
    /// 新しい GetRoomMessagesUseCase を作成
    pub fn new(context: ChatContext) -> Self {
        Self { context }
    }

    /// 履歴取得を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Message>)` - 送信順のメッセージ
    /// * `Err(GetRoomMessagesError)` - Room が存在しない、またはストア障害
    pub async fn execute(&self, room_key: String) -> Result<Vec<Message>, GetRoomMessagesError> {
        let ctx = &self.context;
        let room = self.find_room(room_key).await?;

        let messages = ctx
            .store(ctx.messages.find_many_by_ids(&room.message_ids))
            .await?;
        if messages.len() != room.message_ids.len() {
            tracing::warn!(
                "Room '{}' links {} message(s) but only {} were found",
                room.key,
                room.message_ids.len(),
                messages.len()
            );
        }
        Ok(messages)
    }

    /// Room を取得（存在しなければ NotFound）
    pub async fn find_room(&self, room_key: String) -> Result<Room, GetRoomMessagesError> {
        let ctx = &self.context;
        let key = RoomKey::new(room_key)?;
        let room = ctx.store(ctx.rooms.find_by_key(&key)).await?;
        room.ok_or(GetRoomMessagesError::RoomNotFound(key))
    }
}
