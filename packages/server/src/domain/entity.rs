//! エンティティ

use super::value_object::{ConnectionId, DisplayName, MessageBody, Timestamp};

/// 名前を設定済みの参加者
///
/// 接続が `set_name` に成功してから切断されるまでの間だけ存在します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub connection_id: ConnectionId,
    pub name: DisplayName,
    pub joined_at: Timestamp,
    pub last_activity_at: Timestamp,
}

impl User {
    pub fn new(connection_id: ConnectionId, name: DisplayName, joined_at: Timestamp) -> Self {
        Self {
            connection_id,
            name,
            joined_at,
            last_activity_at: joined_at,
        }
    }

    /// 最終アクティビティ時刻を更新する（時刻が巻き戻ることはない）
    pub fn touch(&mut self, at: Timestamp) {
        if at > self.last_activity_at {
            self.last_activity_at = at;
        }
    }
}

/// 受理されたチャットメッセージ（生成後は不変）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// 送信元の接続（履歴の再送時に `fd` として使われる）
    pub from_id: ConnectionId,
    pub from: DisplayName,
    pub body: MessageBody,
    pub timestamp: Timestamp,
}

impl ChatMessage {
    pub fn new(
        from_id: ConnectionId,
        from: DisplayName,
        body: MessageBody,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            from_id,
            from,
            body,
            timestamp,
        }
    }
}
