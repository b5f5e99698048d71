//! InMemory Broadcast Channel 実装
//!
//! 接続中のリスナー（WebSocket 接続）を HashMap で管理し、新着メッセージを全員に配信します。
//! 配信は各リスナーの unbounded チャンネルへの送信のみで、受信確認は待ちません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{RwLock, mpsc::UnboundedSender};

use crate::{
    domain::{BroadcastChannel, BroadcastError, ListenerId, Message, Timestamp},
    infrastructure::dto::websocket::NewMessageEvent,
};

/// Listener connection information
pub struct ListenerInfo {
    /// Text frame sender channel
    pub sender: UnboundedSender<String>,
    /// When the listener connected
    pub connected_at: Timestamp,
}

impl ListenerInfo {
    /// Time since the listener connected, never negative
    pub fn connected_for_millis(&self, now: Timestamp) -> i64 {
        (now.value() - self.connected_at.value()).max(0)
    }
}

/// インメモリ Broadcast Channel 実装
#[derive(Clone, Default)]
pub struct InMemoryBroadcastChannel {
    listeners: Arc<RwLock<HashMap<ListenerId, ListenerInfo>>>,
}

impl InMemoryBroadcastChannel {
    /// 新しい InMemoryBroadcastChannel を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove listeners whose receiving side has gone away.
    ///
    /// The sender is re-checked under the write lock so a listener that
    /// reconnected with the same id in the meantime is kept.
    async fn prune(&self, closed: Vec<ListenerId>) {
        let mut listeners = self.listeners.write().await;
        for id in closed {
            if listeners
                .get(&id)
                .is_some_and(|info| info.sender.is_closed())
            {
                listeners.remove(&id);
                tracing::info!("Pruned disconnected listener '{}'", id);
            }
        }
    }
}

#[async_trait]
impl BroadcastChannel for InMemoryBroadcastChannel {
    async fn connect(
        &self,
        listener_id: ListenerId,
        sender: UnboundedSender<String>,
    ) -> Result<(), BroadcastError> {
        let mut listeners = self.listeners.write().await;
        if listeners.contains_key(&listener_id) {
            return Err(BroadcastError::DuplicateListener(
                listener_id.as_str().to_string(),
            ));
        }
        listeners.insert(
            listener_id,
            ListenerInfo {
                sender,
                connected_at: Timestamp::now(),
            },
        );
        Ok(())
    }

    async fn disconnect(&self, listener_id: &ListenerId) -> Result<(), BroadcastError> {
        let mut listeners = self.listeners.write().await;
        let info = listeners
            .remove(listener_id)
            .ok_or_else(|| BroadcastError::ListenerNotFound(listener_id.as_str().to_string()))?;
        tracing::debug!(
            "Listener '{}' was connected for {} ms",
            listener_id,
            info.connected_for_millis(Timestamp::now())
        );
        Ok(())
    }

    async fn publish(&self, message: &Message) -> usize {
        let payload = match serde_json::to_string(&NewMessageEvent::new(message)) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to serialize message '{}': {}", message.id, e);
                return 0;
            }
        };

        let mut delivered = 0;
        let mut closed = Vec::new();
        {
            let listeners = self.listeners.read().await;
            for (id, info) in listeners.iter() {
                if info.sender.send(payload.clone()).is_ok() {
                    delivered += 1;
                } else {
                    tracing::warn!("Failed to send message '{}' to listener '{}'", message.id, id);
                    closed.push(id.clone());
                }
            }
        }

        if !closed.is_empty() {
            self.prune(closed).await;
        }
        delivered
    }

    async fn count_listeners(&self) -> usize {
        self.listeners.read().await.len()
    }
}
