//! UseCase: リスナー切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectListenerUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 切断したリスナーに以降のメッセージが配信されないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：リスナーの切断
//! - 異常系：存在しないリスナーの切断試行

use crate::domain::ListenerId;

use super::{context::ChatContext, error::DisconnectError};

/// リスナー切断のユースケース
pub struct DisconnectListenerUseCase {
    context: ChatContext,
}

impl DisconnectListenerUseCase {
    /// 新しい DisconnectListenerUseCase を作成
    pub fn new(context: ChatContext) -> Self {
        Self { context }
    }

    /// リスナー切断を実行
    pub async fn execute(&self, listener_id: &ListenerId) -> Result<(), DisconnectError> {
        let broadcast = &self.context.broadcast;
        broadcast.disconnect(listener_id).await?;
        tracing::info!(
            "Listener '{}' disconnected ({} remaining)",
            listener_id,
            broadcast.count_listeners().await
        );
        Ok(())
    }
}
