//! UseCase 層
//!
//! 接続のライフサイクルとチャットの操作ごとにユースケースを定義します。
//! `MessageRouter` が受信フレームを各ユースケースに振り分けます。

pub mod connect_participant;
pub mod disconnect_participant;
pub mod error;
pub mod get_stats;
pub mod notify;
pub mod router;
pub mod send_message;
pub mod set_name;

pub use connect_participant::{ConnectParticipantUseCase, DEFAULT_HISTORY_REPLAY, WELCOME_MESSAGE};
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{NotifyError, SendMessageError, SetNameError};
pub use get_stats::{GetStatsUseCase, RelayStats};
pub use notify::Notifier;
pub use router::{MessageRouter, RATE_LIMIT_MESSAGE, SERVER_ERROR_MESSAGE};
pub use send_message::SendMessageUseCase;
pub use set_name::SetNameUseCase;
