//! InMemory Message Repository 実装

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    Message, MessageId, MessageIdFactory, MessageRepository, MessageText, RepositoryError,
    Timestamp, UserId,
};

/// インメモリ Message Repository 実装（追記のみ）
#[derive(Clone, Default)]
pub struct InMemoryMessageRepository {
    messages: Arc<RwLock<HashMap<MessageId, Message>>>,
}

impl InMemoryMessageRepository {
    /// 新しい InMemoryMessageRepository を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存されているメッセージの数
    pub async fn count_messages(&self) -> usize {
        self.messages.read().await.len()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn create(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
        text: MessageText,
    ) -> Result<Message, RepositoryError> {
        let message = Message::new(
            MessageIdFactory::generate(),
            sender_id,
            receiver_id,
            text,
            Timestamp::now(),
        );
        let mut messages = self.messages.write().await;
        if messages.contains_key(&message.id) {
            return Err(RepositoryError::Conflict(format!(
                "message id '{}' already exists",
                message.id
            )));
        }
        messages.insert(message.id.clone(), message.clone());
        Ok(message)
    }

    async fn find_by_id(&self, id: &MessageId) -> Result<Option<Message>, RepositoryError> {
        let messages = self.messages.read().await;
        Ok(messages.get(id).cloned())
    }

    async fn find_many_by_ids(&self, ids: &[MessageId]) -> Result<Vec<Message>, RepositoryError> {
        let messages = self.messages.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| messages.get(id).cloned())
            .collect())
    }
}
