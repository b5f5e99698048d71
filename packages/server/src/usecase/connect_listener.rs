//! UseCase: リスナー接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectListenerUseCase::execute() メソッド
//! - リスナーの登録（重複チェック）
//!
//! ### なぜこのテストが必要か
//! - 接続したリスナーが以降のメッセージを受信できることを保証
//! - 重複接続を防ぐ
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規リスナーの接続
//! - 異常系：重複した listener_id での接続試行

use tokio::sync::mpsc::UnboundedSender;

use crate::domain::ListenerId;

use super::{context::ChatContext, error::ConnectError};

/// リスナー接続のユースケース
pub struct ConnectListenerUseCase {
    context: ChatContext,
}

impl ConnectListenerUseCase {
    /// 新しい ConnectListenerUseCase を作成
    pub fn new(context: ChatContext) -> Self {
        Self { context }
    }

    /// リスナー接続を実行
    ///
    /// # Arguments
    ///
    /// * `listener_id` - 接続するリスナーの ID（Domain Model）
    /// * `sender` - イベント送信チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 接続成功
    /// * `Err(ConnectError)` - 接続失敗
    pub async fn execute(
        &self,
        listener_id: ListenerId,
        sender: UnboundedSender<String>,
    ) -> Result<(), ConnectError> {
        // 重複チェックと登録はチャンネル側で 1 回のロック区間で行う
        self.context
            .broadcast
            .connect(listener_id.clone(), sender)
            .await?;

        let total = self.context.broadcast.count_listeners().await;
        tracing::info!("Listener '{}' connected ({} total)", listener_id, total);
        Ok(())
    }
}
