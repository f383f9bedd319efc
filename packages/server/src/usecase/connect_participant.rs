//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - ウェルカムメッセージと直近履歴の送信
//!
//! ### なぜこのテストが必要か
//! - 新規接続が名前を設定する前にチャットの流れを把握できることを保証
//! - 履歴が空のときに空の history フレームを送らないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：履歴が空の状態での接続
//! - 正常系：履歴が再送件数より多い状態での接続（直近分だけ古い順に届く）

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, HistoryRepository, PusherChannel},
    infrastructure::dto::websocket::ServerMessage,
};

use super::{error::NotifyError, notify::Notifier};

/// 接続直後に送るウェルカムメッセージ
pub const WELCOME_MESSAGE: &str = "Welcome to Parlor! Please set your name.";

/// 接続時に再送する履歴件数の既定値
pub const DEFAULT_HISTORY_REPLAY: usize = 10;

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    history: Arc<dyn HistoryRepository>,
    notifier: Notifier,
    replay: usize,
}

impl ConnectParticipantUseCase {
    pub fn new(history: Arc<dyn HistoryRepository>, notifier: Notifier, replay: usize) -> Self {
        Self {
            history,
            notifier,
            replay,
        }
    }

    /// 参加者接続を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 新しい接続の ID
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 再送した履歴の件数
    /// * `Err(NotifyError)` - 送信用フレームのエンコード失敗
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<usize, NotifyError> {
        // 1. MessagePusher にクライアントを登録
        self.notifier
            .pusher()
            .register_client(connection_id, sender)
            .await;

        // 2. ウェルカムメッセージ
        let welcome = ServerMessage::system(
            WELCOME_MESSAGE,
            self.notifier.clock_time(),
            Some(connection_id),
        );
        self.notifier.send(connection_id, &welcome).await?;

        // 3. 直近の履歴（空なら送らない）
        let recent = self.history.recent(self.replay).await;
        if recent.is_empty() {
            return Ok(0);
        }
        let entries: Vec<ServerMessage> = recent.iter().map(ServerMessage::from).collect();
        let replayed = entries.len();
        let frame = ServerMessage::history(connection_id, entries, self.notifier.clock_time());
        self.notifier.send(connection_id, &frame).await?;

        Ok(replayed)
    }
}
