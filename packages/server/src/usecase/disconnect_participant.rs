//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 退出通知のブロードキャストと接続単位の状態の破棄
//!
//! ### なぜこのテストが必要か
//! - 切断後に名前が再利用できることを保証
//! - 同じ接続の close が二重に届いても退出通知が 1 回だけであることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：名前設定済みの接続の切断
//! - 正常系：名前未設定の接続の切断（通知なし）
//! - エッジケース：同じ接続の二重切断

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, RateLimiter, User, UserRepository},
    infrastructure::dto::websocket::ServerMessage,
};

use super::notify::Notifier;

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    users: Arc<dyn UserRepository>,
    rate_limiter: Arc<dyn RateLimiter>,
    notifier: Notifier,
}

impl DisconnectParticipantUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        rate_limiter: Arc<dyn RateLimiter>,
        notifier: Notifier,
    ) -> Self {
        Self {
            users,
            rate_limiter,
            notifier,
        }
    }

    /// 参加者切断を実行
    ///
    /// ユーザーの削除は取り出しとして行うため、同じ接続に対して何度呼ばれても
    /// 退出通知は最初の 1 回だけです。
    ///
    /// # Returns
    ///
    /// 名前を設定済みだった場合はそのユーザー
    pub async fn execute(&self, connection_id: ConnectionId) -> Option<User> {
        // 1. 配送先から外す（以降のブロードキャストは届かない）
        self.notifier
            .pusher()
            .unregister_client(connection_id)
            .await;

        // 2. ユーザーを取り出して退出を通知
        let removed = self.users.remove(connection_id).await;
        match &removed {
            Some(user) => {
                let left = ServerMessage::system(
                    format!("User '{}' left the chat", user.name),
                    self.notifier.clock_time(),
                    None,
                );
                if let Err(e) = self.notifier.broadcast(&left).await {
                    tracing::error!("Failed to announce departure of {}: {}", user.name, e);
                }
                tracing::info!("User '{}' (connection {}) left", user.name, connection_id);
            }
            None => {
                tracing::info!("Connection {} closed", connection_id);
            }
        }

        // 3. レート制限の状態を破棄
        self.rate_limiter.discard(connection_id).await;

        removed
    }
}
