//! UseCase: ユーザー一覧取得

use crate::domain::{RepositoryError, User};

use super::context::ChatContext;

/// ユーザー一覧取得のユースケース
pub struct ListUsersUseCase {
    context: ChatContext,
}

impl ListUsersUseCase {
    /// 新しい ListUsersUseCase を作成
    pub fn new(context: ChatContext) -> Self {
        Self { context }
    }

    /// 登録順のユーザー一覧を返す
    pub async fn execute(&self) -> Result<Vec<User>, RepositoryError> {
        let ctx = &self.context;
        ctx.store(ctx.users.list()).await
    }
}
