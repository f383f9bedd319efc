//! 流量制限の実装

pub mod inmemory;

pub use inmemory::InMemoryRateLimiter;
