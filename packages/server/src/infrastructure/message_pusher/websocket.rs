//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - WebSocket 接続ごとの `UnboundedSender` を管理
//! - クライアントへのメッセージ送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! sender の先にある書き込みタスクが終了していれば（`is_closed`）、その接続は確立済みとはみなしません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel};

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// pusher.register_client(connection_id, tx).await;
///
/// // 全員に送信
/// pusher.broadcast("{\"type\":\"system\",\"message\":\"Hello\"}").await;
/// ```
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの WebSocket sender
    clients: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(connection_id, sender);
        tracing::debug!("Connection {} registered to MessagePusher", connection_id);
    }

    async fn unregister_client(&self, connection_id: ConnectionId) {
        let mut clients = self.clients.lock().await;
        if clients.remove(&connection_id).is_some() {
            tracing::debug!("Connection {} unregistered from MessagePusher", connection_id);
        }
    }

    async fn push_to(
        &self,
        connection_id: ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        let sender = clients
            .get(&connection_id)
            .ok_or(MessagePushError::ClientNotFound(connection_id.value()))?;
        sender
            .send(content.to_string())
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to connection {}", connection_id);
        Ok(())
    }

    async fn broadcast(&self, content: &str) -> usize {
        let clients = self.clients.lock().await;

        let mut delivered = 0;
        for (connection_id, sender) in clients.iter() {
            // ブロードキャストでは閉じかけの接続をスキップする
            if sender.is_closed() {
                tracing::debug!("Connection {} is closing, skipping broadcast", connection_id);
                continue;
            }
            match sender.send(content.to_string()) {
                Ok(()) => delivered += 1,
                Err(e) => tracing::debug!(
                    "Failed to push message to connection {}: {}",
                    connection_id,
                    e
                ),
            }
        }
        tracing::debug!("Broadcasted message to {} connections", delivered);

        delivered
    }

    async fn count_connections(&self) -> usize {
        let clients = self.clients.lock().await;
        clients.values().filter(|sender| !sender.is_closed()).count()
    }
}
