//! Parlor chat relay.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin parlor-server
//! cargo run --bin parlor-server -- --host 127.0.0.1 --port 3000 --rate-limit 60
//! ```

use std::sync::Arc;

use clap::Parser;
use parlor_server::{config::ChatConfig, domain::RateLimitPolicy, ui::Server};
use parlor_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "parlor-server")]
#[command(about = "Real-time WebSocket chat relay", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "9502")]
    port: u16,

    /// Number of chat messages kept in history (at least 1)
    #[arg(
        long,
        default_value = "100",
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    history_capacity: usize,

    /// Number of recent messages replayed to a new connection
    #[arg(long, default_value = "10")]
    history_replay: usize,

    /// Maximum messages per connection per minute
    #[arg(long, default_value = "30")]
    rate_limit: u32,
}

impl From<&Args> for ChatConfig {
    fn from(args: &Args) -> Self {
        Self {
            history_capacity: args.history_capacity,
            history_replay: args.history_replay,
            rate_limit: RateLimitPolicy::per_minute(args.rate_limit),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let config = ChatConfig::from(&args);

    tracing::info!("Starting Parlor chat relay (PID {})", std::process::id());
    tracing::debug!("{:?}", config);

    let server = Server::in_memory(&config, Arc::new(SystemClock));
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // テスト項目: 引数なしでは既定の設定になる
        // given (前提条件):
        let args = Args::try_parse_from(["parlor-server"]).unwrap();

        // when (操作):
        let config = ChatConfig::from(&args);

        // then (期待する結果):
        assert_eq!(args.port, 9502);
        assert_eq!(config.history_capacity, 100);
        assert_eq!(config.history_replay, 10);
        assert_eq!(config.rate_limit, RateLimitPolicy::per_minute(30));
    }

    #[test]
    fn test_zero_history_capacity_is_rejected() {
        // テスト項目: 履歴の容量 0 は起動時に拒否される
        // given (前提条件):
        let argv = ["parlor-server", "--history-capacity", "0"];

        // when (操作):
        let result = Args::try_parse_from(argv);

        // then (期待する結果):
        assert!(result.is_err());
        assert!(Args::try_parse_from(["parlor-server", "--history-capacity", "1"]).is_ok());
    }
}
