//! 送信用フレームのエンコードと配送
//!
//! UseCase はここを通して `MessagePusher` に文字列を渡します。
//! ブロードキャストは 1 回だけシリアライズし、個別送信で宛先が既に
//! 存在しない場合は何もしません（呼び出し元にはエラーを返さない）。

use std::sync::Arc;

use parlor_shared::time::{Clock, format_clock_time};

use crate::{
    domain::{ConnectionId, MessagePusher, Timestamp},
    infrastructure::dto::websocket::ServerMessage,
};

use super::error::NotifyError;

/// MessagePusher と時計をまとめたもの
#[derive(Clone)]
pub struct Notifier {
    pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl Notifier {
    pub fn new(pusher: Arc<dyn MessagePusher>, clock: Arc<dyn Clock>) -> Self {
        Self { pusher, clock }
    }

    pub fn pusher(&self) -> &Arc<dyn MessagePusher> {
        &self.pusher
    }

    /// 現在時刻
    pub fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_millis())
    }

    /// 現在時刻の `HH:MM:SS` 表現
    pub fn clock_time(&self) -> String {
        format_clock_time(self.clock.now_millis())
    }

    /// 1 つの接続に送信する
    pub async fn send(
        &self,
        connection_id: ConnectionId,
        message: &ServerMessage,
    ) -> Result<(), NotifyError> {
        let json = message.to_json()?;
        if let Err(e) = self.pusher.push_to(connection_id, &json).await {
            tracing::debug!("Dropped message for connection {}: {}", connection_id, e);
        }
        Ok(())
    }

    /// 確立済みの全接続に送信し、送信できた接続数を返す
    pub async fn broadcast(&self, message: &ServerMessage) -> Result<usize, NotifyError> {
        let json = message.to_json()?;
        Ok(self.pusher.broadcast(&json).await)
    }

    /// `error` フレームを送信する
    pub async fn send_error(
        &self,
        connection_id: ConnectionId,
        text: &str,
    ) -> Result<(), NotifyError> {
        let error = ServerMessage::error(connection_id, text, self.clock_time());
        self.send(connection_id, &error).await
    }
}
