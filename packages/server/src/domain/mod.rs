//! ドメイン層
//!
//! 値オブジェクト、エンティティ、およびインフラ層が実装する trait を定義します。

pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod rate_limit;
pub mod repository;
pub mod value_object;

pub use entity::{ChatMessage, User};
pub use error::{MessagePushError, RepositoryError, ValueObjectError};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use rate_limit::{RateLimitPolicy, RateLimiter, RateWindow};
pub use repository::{HistoryRepository, UserRepository};
pub use value_object::{
    ConnectionId, DisplayName, MAX_DISPLAY_NAME_CHARS, MAX_MESSAGE_BODY_CHARS, MessageBody,
    Timestamp,
};

#[cfg(test)]
pub use rate_limit::MockRateLimiter;
