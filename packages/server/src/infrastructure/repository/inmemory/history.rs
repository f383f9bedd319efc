//! InMemory History Repository 実装
//!
//! 直近のチャットメッセージを固定容量の `VecDeque` に保持します。

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatMessage, HistoryRepository};

/// 履歴の既定の容量
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// インメモリ History Repository 実装
pub struct InMemoryHistoryRepository {
    messages: Mutex<VecDeque<ChatMessage>>,
    capacity: usize,
}

impl InMemoryHistoryRepository {
    /// 既定の容量 (100) で作成
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// 容量を指定して作成（容量 0 では何も保持しない）
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            messages: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }
}

impl Default for InMemoryHistoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn append(&self, message: ChatMessage) {
        let mut messages = self.messages.lock().await;
        messages.push_back(message);
        while messages.len() > self.capacity {
            messages.pop_front();
        }
    }

    async fn recent(&self, n: usize) -> Vec<ChatMessage> {
        let messages = self.messages.lock().await;
        let skip = messages.len().saturating_sub(n);
        messages.iter().skip(skip).cloned().collect()
    }

    async fn len(&self) -> usize {
        let messages = self.messages.lock().await;
        messages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionId, DisplayName, MessageBody, Timestamp};

    fn message(n: i64) -> ChatMessage {
        ChatMessage::new(
            ConnectionId::new(1),
            DisplayName::new("alice").unwrap(),
            MessageBody::new(&format!("message {n}")).unwrap(),
            Timestamp::new(n),
        )
    }

    #[tokio::test]
    async fn test_recent_returns_oldest_first() {
        // テスト項目: 直近 n 件が古い順に返される
        // given (前提条件):
        let repo = InMemoryHistoryRepository::new();
        for n in 0..15 {
            repo.append(message(n)).await;
        }

        // when (操作):
        let recent = repo.recent(10).await;

        // then (期待する結果):
        assert_eq!(recent.len(), 10);
        assert_eq!(recent.first().unwrap().timestamp, Timestamp::new(5));
        assert_eq!(recent.last().unwrap().timestamp, Timestamp::new(14));
    }

    #[tokio::test]
    async fn test_recent_with_fewer_messages_than_requested() {
        // テスト項目: 保持件数が n 未満なら全件が返される
        // given (前提条件):
        let repo = InMemoryHistoryRepository::new();
        repo.append(message(1)).await;
        repo.append(message(2)).await;

        // when (操作):
        let recent = repo.recent(10).await;
        let empty = InMemoryHistoryRepository::new().recent(10).await;

        // then (期待する結果):
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].timestamp, Timestamp::new(1));
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_append_past_capacity_evicts_oldest() {
        // テスト項目: 容量を超えると最も古いメッセージから捨てられる
        // given (前提条件):
        let repo = InMemoryHistoryRepository::new();
        for n in 0..100 {
            repo.append(message(n)).await;
        }
        assert_eq!(repo.len().await, 100);

        // when (操作):
        repo.append(message(100)).await;

        // then (期待する結果):
        assert_eq!(repo.len().await, 100);
        let all = repo.recent(100).await;
        assert_eq!(all.first().unwrap().timestamp, Timestamp::new(1));
        assert_eq!(all.last().unwrap().timestamp, Timestamp::new(100));
        assert!(all.iter().all(|m| m.timestamp != Timestamp::new(0)));
    }

    #[tokio::test]
    async fn test_custom_capacity() {
        // テスト項目: 指定した容量が上限として使われる
        // given (前提条件):
        let repo = InMemoryHistoryRepository::with_capacity(3);

        // when (操作):
        for n in 0..10 {
            repo.append(message(n)).await;
        }

        // then (期待する結果):
        let kept: Vec<i64> = repo
            .recent(10)
            .await
            .iter()
            .map(|m| m.timestamp.value())
            .collect();
        assert_eq!(kept, vec![7, 8, 9]);
    }

    #[tokio::test]
    async fn test_zero_capacity_keeps_nothing() {
        // テスト項目: 容量 0 では追加したメッセージが保持されない
        // given (前提条件):
        let repo = InMemoryHistoryRepository::with_capacity(0);

        // when (操作):
        repo.append(message(1)).await;

        // then (期待する結果):
        assert_eq!(repo.len().await, 0);
        assert!(repo.recent(10).await.is_empty());
    }
}
