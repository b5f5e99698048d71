//! UseCase: ユーザー登録

use crate::domain::{User, UserName};

use super::{context::ChatContext, error::RegisterUserError};

/// ユーザー登録のユースケース
pub struct RegisterUserUseCase {
    context: ChatContext,
}

impl RegisterUserUseCase {
    /// 新しい RegisterUserUseCase を作成
    pub fn new(context: ChatContext) -> Self {
        Self { context }
    }

    /// ユーザー登録を実行
    ///
    /// 名前が欠落または空文字なら BadRequest、空白のみや長すぎる場合は Validation。
    pub async fn execute(&self, name: Option<String>) -> Result<User, RegisterUserError> {
        let name = match name {
            Some(name) if !name.is_empty() => UserName::new(name)?,
            _ => return Err(RegisterUserError::BadRequest("name")),
        };

        let ctx = &self.context;
        let user = ctx.store(ctx.users.create(name)).await?;
        tracing::info!("Registered user '{}' ({})", user.name, user.id);
        Ok(user)
    }
}
