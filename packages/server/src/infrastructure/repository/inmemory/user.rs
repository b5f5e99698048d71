//! InMemory User Repository 実装

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    RepositoryError, Timestamp, User, UserId, UserIdFactory, UserName, UserRepository,
};

#[derive(Default)]
struct UserTable {
    /// 登録順の ID
    order: Vec<UserId>,
    by_id: HashMap<UserId, User>,
}

/// インメモリ User Repository 実装
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    table: Arc<RwLock<UserTable>>,
}

impl InMemoryUserRepository {
    /// 新しい InMemoryUserRepository を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// ID を指定してユーザーを登録する（既存の ID は上書き）
    ///
    /// 外部で作成済みのユーザーを取り込む用途とテスト用。
    pub async fn insert(&self, user: User) {
        let mut table = self.table.write().await;
        if table.by_id.insert(user.id.clone(), user.clone()).is_none() {
            table.order.push(user.id);
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, name: UserName) -> Result<User, RepositoryError> {
        let user = User::new(UserIdFactory::generate(), name, Timestamp::now());
        let mut table = self.table.write().await;
        if table.by_id.contains_key(&user.id) {
            return Err(RepositoryError::Conflict(format!(
                "user id '{}' already exists",
                user.id
            )));
        }
        table.by_id.insert(user.id.clone(), user.clone());
        table.order.push(user.id.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let table = self.table.read().await;
        Ok(table.by_id.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let table = self.table.read().await;
        Ok(table
            .order
            .iter()
            .filter_map(|id| table.by_id.get(id).cloned())
            .collect())
    }
}
