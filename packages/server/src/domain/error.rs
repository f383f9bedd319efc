//! ドメイン層のエラー型

use thiserror::Error;

/// 値オブジェクト生成時の検証エラー
///
/// `Display` の文字列はそのままクライアントへのエラーメッセージとして使われます。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("Name cannot be empty")]
    NameEmpty,

    #[error("Name too long (max 20 characters)")]
    NameTooLong,

    #[error("Message cannot be empty")]
    MessageEmpty,

    #[error("Message too long (max 500 characters)")]
    MessageTooLong,
}

/// Repository 操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// 同じ表示名のユーザーが既に登録されている
    #[error("Name '{0}' is already taken")]
    NameTaken(String),

    /// 表示名が不正
    #[error(transparent)]
    NameInvalid(#[from] ValueObjectError),
}

/// メッセージ送信（push）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Connection {0} not found")]
    ClientNotFound(u64),

    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
