//! InMemory User Repository 実装
//!
//! ドメイン層が定義する UserRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! 表示名の重複チェックと登録は同じロックの中で行うため、
//! 同じ名前を同時に要求した 2 つの接続が両方とも成功することはありません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, DisplayName, RepositoryError, Timestamp, User, UserRepository,
};

/// インメモリ User Repository 実装
#[derive(Default)]
pub struct InMemoryUserRepository {
    /// Key: 接続 ID, Value: 名前を設定済みのユーザー
    users: Mutex<HashMap<ConnectionId, User>>,
}

impl InMemoryUserRepository {
    /// 新しい InMemoryUserRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn register_user(
        &self,
        connection_id: ConnectionId,
        raw_name: &str,
        now: Timestamp,
    ) -> Result<User, RepositoryError> {
        let name = DisplayName::new(raw_name)?;

        let mut users = self.users.lock().await;
        if users.values().any(|user| user.name == name) {
            return Err(RepositoryError::NameTaken(name.into_string()));
        }

        let user = User::new(connection_id, name, now);
        users.insert(connection_id, user.clone());
        Ok(user)
    }

    async fn lookup(&self, connection_id: ConnectionId) -> Option<User> {
        let users = self.users.lock().await;
        users.get(&connection_id).cloned()
    }

    async fn remove(&self, connection_id: ConnectionId) -> Option<User> {
        let mut users = self.users.lock().await;
        users.remove(&connection_id)
    }

    async fn touch(&self, connection_id: ConnectionId, now: Timestamp) {
        let mut users = self.users.lock().await;
        if let Some(user) = users.get_mut(&connection_id) {
            user.touch(now);
        }
    }

    async fn count(&self) -> usize {
        let users = self.users.lock().await;
        users.len()
    }

    async fn users(&self) -> Vec<User> {
        let users = self.users.lock().await;
        let mut list: Vec<User> = users.values().cloned().collect();
        list.sort_by_key(|user| user.connection_id);
        list
    }
}
