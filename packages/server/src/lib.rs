//! Parlor chat relay library.
//!
//! A WebSocket chat relay with unique display names, broadcast chat,
//! bounded history replay and per-connection rate limiting.

pub mod config;

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
