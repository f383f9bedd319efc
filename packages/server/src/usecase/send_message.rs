//! UseCase: チャットメッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 履歴への追加、全員へのブロードキャスト、最終アクティビティの更新
//!
//! ### なぜこのテストが必要か
//! - 名前を設定していない接続からの発言を防ぐ
//! - 送信者自身にもエコーされることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：名前設定済みの接続からの送信
//! - 異常系：名前未設定、空のメッセージ、501 文字のメッセージ

use std::sync::Arc;

use crate::{
    domain::{ChatMessage, ConnectionId, HistoryRepository, MessageBody, UserRepository},
    infrastructure::dto::websocket::ServerMessage,
};

use super::{error::SendMessageError, notify::Notifier};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    users: Arc<dyn UserRepository>,
    history: Arc<dyn HistoryRepository>,
    notifier: Notifier,
}

impl SendMessageUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        history: Arc<dyn HistoryRepository>,
        notifier: Notifier,
    ) -> Self {
        Self {
            users,
            history,
            notifier,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - 履歴に追加したメッセージ
    /// * `Err(SendMessageError)` - 名前未設定または本文の検証エラー
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        raw_message: &str,
    ) -> Result<ChatMessage, SendMessageError> {
        // 1. 送信者の確認
        let user = self
            .users
            .lookup(connection_id)
            .await
            .ok_or(SendMessageError::NameNotSet)?;

        // 2. 本文の検証
        let body = MessageBody::new(raw_message)?;

        // 3. 履歴に追加してブロードキャスト
        let now = self.notifier.now();
        let message = ChatMessage::new(connection_id, user.name, body, now);
        self.history.append(message.clone()).await;
        self.notifier
            .broadcast(&ServerMessage::from(&message))
            .await?;

        // 4. 最終アクティビティを更新
        self.users.touch(connection_id, now).await;

        tracing::info!("Message from {}: {}", message.from, message.body.as_str());

        Ok(message)
    }
}
