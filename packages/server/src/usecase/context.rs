//! 明示的な依存注入のためのコンテキスト
//!
//! ストアとブロードキャストチャンネルのハンドルをまとめたもの。
//! プロセス全体で共有するグローバル状態は持たず、各ユースケースに渡して使います。

use std::{future::Future, sync::Arc, time::Duration};

use crate::domain::{
    BroadcastChannel, MessageRepository, RepositoryError, RoomRepository, UserRepository,
};

/// Store and channel handles shared by every use case
#[derive(Clone)]
pub struct ChatContext {
    pub users: Arc<dyn UserRepository>,
    pub rooms: Arc<dyn RoomRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub broadcast: Arc<dyn BroadcastChannel>,
    /// Deadline applied to each store call, if any
    store_timeout: Option<Duration>,
}

impl ChatContext {
    /// 新しい ChatContext を作成（ストア呼び出しの期限なし）
    pub fn new(
        users: Arc<dyn UserRepository>,
        rooms: Arc<dyn RoomRepository>,
        messages: Arc<dyn MessageRepository>,
        broadcast: Arc<dyn BroadcastChannel>,
    ) -> Self {
        Self {
            users,
            rooms,
            messages,
            broadcast,
            store_timeout: None,
        }
    }

    /// ストア呼び出しごとの期限を設定
    pub fn with_store_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.store_timeout = timeout;
        self
    }

    /// Run a store operation under the configured deadline.
    ///
    /// Expiry yields `RepositoryError::Timeout`; the operation is dropped.
    pub(crate) async fn store<T, F>(&self, operation: F) -> Result<T, RepositoryError>
    where
        F: Future<Output = Result<T, RepositoryError>>,
    {
        match self.store_timeout {
            Some(limit) => tokio::time::timeout(limit, operation)
                .await
                .unwrap_or(Err(RepositoryError::Timeout(limit))),
            None => operation.await,
        }
    }
}
