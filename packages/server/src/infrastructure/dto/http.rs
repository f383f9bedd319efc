//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Registered user as exposed by `/api/stats`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub fd: u64,
    pub name: String,
    /// Unix timestamp (milliseconds)
    pub joined_at: i64,
    /// Unix timestamp (milliseconds)
    pub last_activity_at: i64,
}

/// Relay statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsDto {
    /// Established connections (named or not)
    pub connections: usize,
    /// Connections that have claimed a name
    pub users: Vec<UserDto>,
    /// Messages currently held in history
    pub history: usize,
}
