//! UseCase: 表示名の設定
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SetNameUseCase::execute() メソッド
//! - 入室通知のブロードキャストと name_set の返信
//!
//! ### なぜこのテストが必要か
//! - 表示名の一意性はチャット全体の前提
//! - 検証エラー時に状態が変わらず通知も出ないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：前後の空白付きの名前（トリムされる）
//! - 異常系：重複した名前、空の名前、長すぎる名前

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, User, UserRepository},
    infrastructure::dto::websocket::ServerMessage,
};

use super::{error::SetNameError, notify::Notifier};

/// 表示名設定のユースケース
pub struct SetNameUseCase {
    users: Arc<dyn UserRepository>,
    notifier: Notifier,
}

impl SetNameUseCase {
    pub fn new(users: Arc<dyn UserRepository>, notifier: Notifier) -> Self {
        Self { users, notifier }
    }

    /// 表示名を設定し、全員に入室を通知する
    ///
    /// 入室通知は呼び出し元自身にも届き、その後に `name_set` が送られます。
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        raw_name: &str,
    ) -> Result<User, SetNameError> {
        let user = self
            .users
            .register_user(connection_id, raw_name, self.notifier.now())
            .await?;

        tracing::info!("Connection {} set name to: {}", connection_id, user.name);

        let time = self.notifier.clock_time();
        let joined = ServerMessage::system(
            format!("User '{}' joined the chat", user.name),
            time.clone(),
            None,
        );
        self.notifier.broadcast(&joined).await?;

        let name_set = ServerMessage::name_set(connection_id, user.name.as_str(), time);
        self.notifier.send(connection_id, &name_set).await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MessagePusher, ValueObjectError},
        infrastructure::{
            dto::websocket::MessageType, message_pusher::WebSocketMessagePusher,
            repository::InMemoryUserRepository,
        },
    };
    use parlor_shared::time::FixedClock;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    async fn create_test_usecase(
        clients: &[u64],
    ) -> (
        SetNameUseCase,
        Arc<InMemoryUserRepository>,
        Vec<UnboundedReceiver<String>>,
    ) {
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let mut receivers = Vec::new();
        for id in clients {
            let (tx, rx) = mpsc::unbounded_channel();
            pusher.register_client(ConnectionId::new(*id), tx).await;
            receivers.push(rx);
        }
        let users = Arc::new(InMemoryUserRepository::new());
        let notifier = Notifier::new(pusher, Arc::new(FixedClock::new(1_700_000_000_000)));
        (SetNameUseCase::new(users.clone(), notifier), users, receivers)
    }

    fn next_frame(rx: &mut UnboundedReceiver<String>) -> ServerMessage {
        serde_json::from_str(&rx.try_recv().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_set_name_success() {
        // テスト項目: 名前を設定すると全員に入室通知、本人に name_set が届く
        // given (前提条件):
        let (usecase, users, mut receivers) = create_test_usecase(&[1, 2]).await;

        // when (操作):
        let user = usecase
            .execute(ConnectionId::new(1), "  Alice  ")
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(user.name.as_str(), "Alice");
        assert_eq!(users.lookup(ConnectionId::new(1)).await.unwrap(), user);

        let joined = next_frame(&mut receivers[0]);
        assert_eq!(joined.r#type, MessageType::System);
        assert_eq!(joined.message, "User 'Alice' joined the chat");
        assert_eq!(joined.fd, None);
        let name_set = next_frame(&mut receivers[0]);
        assert_eq!(name_set.r#type, MessageType::NameSet);
        assert_eq!(name_set.message, "Welcome, Alice!");
        assert_eq!(name_set.fd, Some(1));

        let observed = next_frame(&mut receivers[1]);
        assert_eq!(observed.message, "User 'Alice' joined the chat");
        assert!(receivers[1].try_recv().is_err());
    }

    #[tokio::test]
    async fn test_set_name_taken() {
        // テスト項目: 他の接続が使っている名前は拒否され、何も送られない
        // given (前提条件):
        let (usecase, users, mut receivers) = create_test_usecase(&[1, 2]).await;
        usecase.execute(ConnectionId::new(1), "Bob").await.unwrap();
        for rx in receivers.iter_mut() {
            while rx.try_recv().is_ok() {}
        }

        // when (操作):
        let result = usecase.execute(ConnectionId::new(2), "Bob").await;

        // then (期待する結果):
        assert_eq!(result, Err(SetNameError::NameTaken("Bob".to_string())));
        assert!(users.lookup(ConnectionId::new(2)).await.is_none());
        assert!(receivers[0].try_recv().is_err());
        assert!(receivers[1].try_recv().is_err());
    }

    #[tokio::test]
    async fn test_set_name_invalid() {
        // テスト項目: 空の名前と 21 文字の名前は検証エラーになる
        // given (前提条件):
        let (usecase, users, _receivers) = create_test_usecase(&[1]).await;

        // when (操作):
        let empty = usecase.execute(ConnectionId::new(1), "   ").await;
        let too_long = usecase
            .execute(ConnectionId::new(1), &"x".repeat(21))
            .await;

        // then (期待する結果):
        assert_eq!(
            empty,
            Err(SetNameError::InvalidName(ValueObjectError::NameEmpty))
        );
        assert_eq!(
            too_long,
            Err(SetNameError::InvalidName(ValueObjectError::NameTooLong))
        );
        assert_eq!(users.count().await, 0);
    }
}
