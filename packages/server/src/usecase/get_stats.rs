//! UseCase: リレーの状態取得

use std::sync::Arc;

use crate::domain::{HistoryRepository, MessagePusher, User, UserRepository};

/// リレーの状態のスナップショット
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayStats {
    /// 確立済みの接続数（名前の有無を問わない）
    pub connections: usize,
    /// 名前を設定済みのユーザー（接続 ID 順）
    pub users: Vec<User>,
    /// 履歴の件数
    pub history: usize,
}

/// 状態取得のユースケース
pub struct GetStatsUseCase {
    users: Arc<dyn UserRepository>,
    history: Arc<dyn HistoryRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl GetStatsUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        history: Arc<dyn HistoryRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            users,
            history,
            message_pusher,
        }
    }

    pub async fn execute(&self) -> RelayStats {
        RelayStats {
            connections: self.message_pusher.count_connections().await,
            users: self.users.users().await,
            history: self.history.len().await,
        }
    }
}
