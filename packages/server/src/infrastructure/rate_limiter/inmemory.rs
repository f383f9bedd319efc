//! インメモリ RateLimiter 実装

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, RateLimitPolicy, RateLimiter, RateWindow, Timestamp};

/// 接続 ID ごとの `RateWindow` を保持する RateLimiter
#[derive(Default)]
pub struct InMemoryRateLimiter {
    policy: RateLimitPolicy,
    windows: Mutex<HashMap<ConnectionId, RateWindow>>,
}

impl InMemoryRateLimiter {
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self {
            policy,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// ウィンドウを保持している接続数
    pub async fn tracked_connections(&self) -> usize {
        self.windows.lock().await.len()
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn admit(&self, connection_id: ConnectionId, now: Timestamp) -> bool {
        let mut windows = self.windows.lock().await;
        let window = windows
            .entry(connection_id)
            .or_insert_with(|| RateWindow::new(self.policy.bucket(now)));
        let admitted = window.try_admit(now, &self.policy);
        if !admitted {
            tracing::debug!(
                "Connection {} exceeded {} messages per window",
                connection_id,
                self.policy.max_messages
            );
        }
        admitted
    }

    async fn discard(&self, connection_id: ConnectionId) {
        let mut windows = self.windows.lock().await;
        windows.remove(&connection_id);
    }
}
