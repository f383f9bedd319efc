//! Shared utilities for Parlor crates.

pub mod logger;
pub mod time;
