//! Runtime settings for the chat relay.

use crate::{
    domain::RateLimitPolicy, infrastructure::repository::DEFAULT_HISTORY_CAPACITY,
    usecase::DEFAULT_HISTORY_REPLAY,
};

/// Settings consumed when wiring the relay together
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatConfig {
    /// Number of chat messages kept in history
    pub history_capacity: usize,
    /// Number of recent messages replayed to a new connection
    pub history_replay: usize,
    /// Per-connection rate limit
    pub rate_limit: RateLimitPolicy,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            history_replay: DEFAULT_HISTORY_REPLAY,
            rate_limit: RateLimitPolicy::default(),
        }
    }
}
