//! Server state shared by the handlers.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use crate::{
    domain::ConnectionId,
    usecase::{GetStatsUseCase, MessageRouter},
};

/// Shared application state
pub struct AppState {
    /// MessageRouter（接続イベントの振り分け）
    pub router: Arc<MessageRouter>,
    /// GetStatsUseCase（状態取得のユースケース）
    pub get_stats_usecase: Arc<GetStatsUseCase>,
    next_connection_id: AtomicU64,
}

impl AppState {
    pub fn new(router: Arc<MessageRouter>, get_stats_usecase: Arc<GetStatsUseCase>) -> Self {
        Self {
            router,
            get_stats_usecase,
            next_connection_id: AtomicU64::new(1),
        }
    }

    /// Allocate the next connection id (1, 2, 3, ... never reused)
    pub fn allocate_connection_id(&self) -> ConnectionId {
        ConnectionId::new(self.next_connection_id.fetch_add(1, Ordering::Relaxed))
    }
}
