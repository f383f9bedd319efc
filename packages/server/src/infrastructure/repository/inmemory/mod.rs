//! インメモリ Repository 実装

pub mod history;
pub mod user;

pub use history::{DEFAULT_HISTORY_CAPACITY, InMemoryHistoryRepository};
pub use user::InMemoryUserRepository;
