//! MessagePusher trait 定義
//!
//! クライアントへのメッセージ送信（通知）の抽象化。
//! 具体的な実装（WebSocket など）は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError};

/// 接続ごとの送信チャンネル（シリアライズ済みの JSON 文字列を流す）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// クライアントへのメッセージ送信
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続の送信チャンネルを登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続の送信チャンネルを登録解除（存在しなくてもよい）
    async fn unregister_client(&self, connection_id: ConnectionId);

    /// 特定の接続に送信
    async fn push_to(
        &self,
        connection_id: ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// 確立済みの全接続に送信し、送信できた接続数を返す
    ///
    /// 途中で閉じた接続はスキップされ、エラーにはなりません。
    async fn broadcast(&self, content: &str) -> usize;

    /// 確立済みの接続数
    async fn count_connections(&self) -> usize;
}
