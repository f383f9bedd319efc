//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use parlor_shared::time::{Clock, SystemClock};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    config::ChatConfig,
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        rate_limiter::InMemoryRateLimiter,
        repository::{InMemoryHistoryRepository, InMemoryUserRepository},
    },
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, GetStatsUseCase,
        MessageRouter, Notifier, SendMessageUseCase, SetNameUseCase,
    },
};

use super::{
    handler::{get_stats, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chat relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::in_memory(&ChatConfig::default(), Arc::new(SystemClock));
/// server.run("0.0.0.0".to_string(), 9502).await?;
/// ```
pub struct Server {
    /// MessageRouter（接続イベントの振り分け）
    router: Arc<MessageRouter>,
    /// GetStatsUseCase（状態取得のユースケース）
    get_stats_usecase: Arc<GetStatsUseCase>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(router: Arc<MessageRouter>, get_stats_usecase: Arc<GetStatsUseCase>) -> Self {
        Self {
            router,
            get_stats_usecase,
        }
    }

    /// Wire the in-memory relay described by `config`
    pub fn in_memory(config: &ChatConfig, clock: Arc<dyn Clock>) -> Self {
        // 1. Repository / RateLimiter
        let users = Arc::new(InMemoryUserRepository::new());
        let history = Arc::new(InMemoryHistoryRepository::with_capacity(
            config.history_capacity,
        ));
        let rate_limiter = Arc::new(InMemoryRateLimiter::new(config.rate_limit));

        // 2. MessagePusher
        let message_pusher = Arc::new(WebSocketMessagePusher::new());
        let notifier = Notifier::new(message_pusher.clone(), clock);

        // 3. UseCases
        let router = MessageRouter::new(
            ConnectParticipantUseCase::new(
                history.clone(),
                notifier.clone(),
                config.history_replay,
            ),
            SetNameUseCase::new(users.clone(), notifier.clone()),
            SendMessageUseCase::new(users.clone(), history.clone(), notifier.clone()),
            DisconnectParticipantUseCase::new(
                users.clone(),
                rate_limiter.clone(),
                notifier.clone(),
            ),
            rate_limiter,
            notifier,
        );
        let get_stats_usecase = GetStatsUseCase::new(users, history, message_pusher);

        Self::new(Arc::new(router), Arc::new(get_stats_usecase))
    }

    /// Wire the in-memory relay with default settings and the system clock
    pub fn with_defaults() -> Self {
        Self::in_memory(&ChatConfig::default(), Arc::new(SystemClock))
    }

    fn app(self) -> Router {
        let app_state = Arc::new(AppState::new(self.router, self.get_stats_usecase));

        Router::new()
            // WebSocket エンドポイント
            .route("/", get(websocket_handler))
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/stats", get(get_stats))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the WebSocket chat server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "0.0.0.0")
    /// * `port` - The port number to bind to (e.g., 9502)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Chat relay listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener).await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve on an already bound listener until Ctrl+C or SIGTERM
    pub async fn serve(self, listener: TcpListener) -> std::io::Result<()> {
        self.serve_with_shutdown(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `signal` resolves
    pub async fn serve_with_shutdown<F>(self, listener: TcpListener, signal: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.app())
            .with_graceful_shutdown(signal)
            .await
    }
}
