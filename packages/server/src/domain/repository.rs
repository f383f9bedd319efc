//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ChatMessage, ConnectionId, RepositoryError, Timestamp, User};

/// 接続レジストリ（接続 ID → ユーザー）
///
/// 表示名の一意性を保証します。`register_user` の重複チェックと登録は
/// 1 つのアトミックな操作として実行されなければなりません。
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 表示名を検証して登録する
    ///
    /// 既に名前を持つ接続からの再登録は上書きになります（退出・再入室の通知なし）。
    /// 重複チェックは呼び出し元自身の現在の名前も含めた全ユーザーに対して行います。
    async fn register_user(
        &self,
        connection_id: ConnectionId,
        raw_name: &str,
        now: Timestamp,
    ) -> Result<User, RepositoryError>;

    /// 接続に対応するユーザーを取得
    async fn lookup(&self, connection_id: ConnectionId) -> Option<User>;

    /// ユーザーを削除し、削除したユーザーを返す（存在しなければ何もしない）
    async fn remove(&self, connection_id: ConnectionId) -> Option<User>;

    /// 最終アクティビティ時刻を更新
    async fn touch(&self, connection_id: ConnectionId, now: Timestamp);

    /// 登録中のユーザー数
    async fn count(&self) -> usize;

    /// 登録中のユーザー一覧（接続 ID 順）
    async fn users(&self) -> Vec<User>;
}

/// メッセージ履歴（固定容量の FIFO）
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// 末尾に追加し、容量を超えた分を先頭から捨てる
    async fn append(&self, message: ChatMessage);

    /// 直近 `n` 件を古い順に取得
    async fn recent(&self, n: usize) -> Vec<ChatMessage>;

    /// 保持している件数
    async fn len(&self) -> usize;
}
