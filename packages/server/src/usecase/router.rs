//! UseCase: 受信フレームの振り分け
//!
//! 接続のライフサイクルイベント（open / message / close / error）を受け取り、
//! 各ユースケースに振り分けます。
//!
//! 受信フレームは次の順で処理します。
//!
//! 1. JSON として解釈できなければ `Invalid JSON format`
//! 2. レート制限を超えていれば `Rate limit exceeded. Please slow down.`
//!    （解釈できたフレームは種類を問わず 1 件として数える）
//! 3. `type` に応じて各ユースケースへ
//!
//! 処理中の内部エラーやパニックはログに残し、送信者には
//! `Server error processing message` を返します。接続は維持されます。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - MessageRouter の on_open / on_message / on_close
//! - 典型的な会話の流れ（接続、名前設定、発言、切断）
//!
//! ### なぜこのテストが必要か
//! - 各ユースケースを組み合わせたときの送信順序と宛先を保証
//! - 不正な入力やレート超過で接続状態が壊れないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：2 人の会話、再接続時の履歴再送
//! - 異常系：不正な JSON、未知の type、名前未設定での発言、レート超過
//! - 異常系：処理中のパニック、通知の内部エラー
//! - 並行：別々のワーカーからの同じ名前の同時要求

use std::{panic::AssertUnwindSafe, sync::Arc};

use futures_util::FutureExt;
use thiserror::Error;

use crate::{
    domain::{ConnectionId, PusherChannel, RateLimiter},
    infrastructure::dto::websocket::{ClientCommand, InboundFrame, ServerMessage},
};

use super::{
    connect_participant::ConnectParticipantUseCase,
    disconnect_participant::DisconnectParticipantUseCase,
    error::{NotifyError, SendMessageError, SetNameError},
    notify::Notifier,
    send_message::SendMessageUseCase,
    set_name::SetNameUseCase,
};

/// レート超過時のエラー本文
pub const RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded. Please slow down.";

/// 内部エラー時のエラー本文
pub const SERVER_ERROR_MESSAGE: &str = "Server error processing message";

/// 振り分けの失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
enum DispatchError {
    /// 送信者にそのまま返すエラー
    #[error("{0}")]
    Rejected(String),

    /// ログに残して汎用メッセージを返すエラー
    #[error("{0}")]
    Internal(String),
}

impl From<NotifyError> for DispatchError {
    fn from(e: NotifyError) -> Self {
        Self::Internal(e.to_string())
    }
}

impl From<SetNameError> for DispatchError {
    fn from(e: SetNameError) -> Self {
        match e {
            SetNameError::Internal(cause) => cause.into(),
            rejected => Self::Rejected(rejected.to_string()),
        }
    }
}

impl From<SendMessageError> for DispatchError {
    fn from(e: SendMessageError) -> Self {
        match e {
            SendMessageError::Internal(cause) => cause.into(),
            rejected => Self::Rejected(rejected.to_string()),
        }
    }
}

/// 接続イベントの振り分け役
pub struct MessageRouter {
    connect: ConnectParticipantUseCase,
    set_name: SetNameUseCase,
    send_message: SendMessageUseCase,
    disconnect: DisconnectParticipantUseCase,
    rate_limiter: Arc<dyn RateLimiter>,
    notifier: Notifier,
}

impl MessageRouter {
    pub fn new(
        connect: ConnectParticipantUseCase,
        set_name: SetNameUseCase,
        send_message: SendMessageUseCase,
        disconnect: DisconnectParticipantUseCase,
        rate_limiter: Arc<dyn RateLimiter>,
        notifier: Notifier,
    ) -> Self {
        Self {
            connect,
            set_name,
            send_message,
            disconnect,
            rate_limiter,
            notifier,
        }
    }

    /// 接続が確立した
    pub async fn on_open(&self, connection_id: ConnectionId, sender: PusherChannel) {
        tracing::info!("New connection: {}", connection_id);
        if let Err(e) = self.connect.execute(connection_id, sender).await {
            tracing::error!("Failed to greet connection {}: {}", connection_id, e);
        }
    }

    /// フレームを受信した
    pub async fn on_message(&self, connection_id: ConnectionId, raw: &[u8]) {
        // 1. デコード
        let frame = match InboundFrame::parse(raw) {
            Ok(frame) => frame,
            Err(e) => {
                self.reply_error(connection_id, &e.to_string()).await;
                return;
            }
        };

        // 2. レート制限
        if !self
            .rate_limiter
            .admit(connection_id, self.notifier.now())
            .await
        {
            self.reply_error(connection_id, RATE_LIMIT_MESSAGE).await;
            return;
        }

        // 3. 振り分け
        let outcome = AssertUnwindSafe(self.dispatch(connection_id, frame.into_command()))
            .catch_unwind()
            .await;
        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(DispatchError::Rejected(text))) => {
                self.reply_error(connection_id, &text).await;
            }
            Ok(Err(DispatchError::Internal(cause))) => {
                tracing::error!(
                    "Error processing message from {}: {}",
                    connection_id,
                    cause
                );
                self.reply_error(connection_id, SERVER_ERROR_MESSAGE).await;
            }
            Err(_) => {
                tracing::error!("Panic while processing message from {}", connection_id);
                self.reply_error(connection_id, SERVER_ERROR_MESSAGE).await;
            }
        }
    }

    /// 接続が閉じた（同じ接続で複数回呼ばれてもよい）
    pub async fn on_close(&self, connection_id: ConnectionId) {
        self.disconnect.execute(connection_id).await;
    }

    /// トランスポート層のエラー（状態は変更しない）
    pub fn on_error(&self, connection_id: ConnectionId, cause: &str) {
        tracing::warn!("Connection {} error: {}", connection_id, cause);
    }

    async fn dispatch(
        &self,
        connection_id: ConnectionId,
        command: ClientCommand,
    ) -> Result<(), DispatchError> {
        match command {
            ClientCommand::SetName { name } => {
                self.set_name.execute(connection_id, &name).await?;
            }
            ClientCommand::Message { message } => {
                self.send_message.execute(connection_id, &message).await?;
            }
            ClientCommand::Ping => {
                let pong = ServerMessage::pong(connection_id, self.notifier.clock_time());
                self.notifier.send(connection_id, &pong).await?;
            }
            ClientCommand::Unknown { kind } => {
                return Err(DispatchError::Rejected(format!(
                    "Unknown message type: {}",
                    kind
                )));
            }
        }
        Ok(())
    }

    async fn reply_error(&self, connection_id: ConnectionId, text: &str) {
        if let Err(e) = self.notifier.send_error(connection_id, text).await {
            tracing::error!("Failed to send error to {}: {}", connection_id, e);
        }
    }
}
