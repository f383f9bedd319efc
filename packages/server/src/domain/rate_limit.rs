//! 接続ごとの流量制限
//!
//! 1 分単位のバケットを「現在」と「直前」の 2 つだけ数える近似スライディングウィンドウ。
//! 分の境界をまたぐ 60 秒間では上限の最大 2 倍まで受理され得ます。

use async_trait::async_trait;
use parlor_shared::time::bucket_of;

use super::value_object::{ConnectionId, Timestamp};

/// 1 バケットあたりの既定の受理上限
pub const DEFAULT_MAX_MESSAGES_PER_MINUTE: u32 = 30;

/// バケット幅（ミリ秒）
pub const DEFAULT_BUCKET_MILLIS: i64 = 60_000;

/// 流量制限のパラメータ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// 現在 + 直前バケットの合計がこの値に達したら拒否する
    pub max_messages: u32,
    pub bucket_millis: i64,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            max_messages: DEFAULT_MAX_MESSAGES_PER_MINUTE,
            bucket_millis: DEFAULT_BUCKET_MILLIS,
        }
    }
}

impl RateLimitPolicy {
    pub fn per_minute(max_messages: u32) -> Self {
        Self {
            max_messages,
            ..Self::default()
        }
    }

    pub fn bucket(&self, at: Timestamp) -> i64 {
        bucket_of(at.value(), self.bucket_millis)
    }
}

/// 1 接続分のウィンドウ（2 カウンタ、判定は O(1)）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateWindow {
    bucket: i64,
    current: u32,
    previous: u32,
}

impl RateWindow {
    pub fn new(bucket: i64) -> Self {
        Self {
            bucket,
            current: 0,
            previous: 0,
        }
    }

    /// 判定前に `bucket - 1` より古い記録を捨てる
    fn roll_to(&mut self, bucket: i64) {
        // 時計が巻き戻った場合は既存の記録をそのまま数える
        if bucket <= self.bucket {
            return;
        }
        self.previous = if self.bucket.checked_add(1) == Some(bucket) {
            self.current
        } else {
            0
        };
        self.current = 0;
        self.bucket = bucket;
    }

    /// 受理できれば記録して `true` を返す。拒否時は何も記録しない。
    pub fn try_admit(&mut self, now: Timestamp, policy: &RateLimitPolicy) -> bool {
        self.roll_to(policy.bucket(now));
        if self.count() >= policy.max_messages {
            return false;
        }
        self.current += 1;
        true
    }

    /// ウィンドウ内（現在 + 直前バケット）の記録数
    pub fn count(&self) -> u32 {
        self.current + self.previous
    }
}

/// 流量制限器
///
/// ウィンドウは接続の最初のメッセージで作られ、`discard` で破棄されます。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// `now` 時点でメッセージを受理するか判定する
    async fn admit(&self, connection_id: ConnectionId, now: Timestamp) -> bool;

    /// 接続のウィンドウを破棄する（存在しなくてもよい）
    async fn discard(&self, connection_id: ConnectionId);
}
