//! UseCase 層のエラー型
//!
//! クライアント起因のエラー（検証エラーなど）は `Display` の文字列がそのまま
//! `error` フレームの本文になります。`Internal` だけはサーバー側でログに残し、
//! クライアントには汎用メッセージを返します。

use thiserror::Error;

use crate::domain::{RepositoryError, ValueObjectError};

/// 送信用フレームのエンコードに失敗した
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    #[error("Failed to encode outbound message: {0}")]
    Encode(String),
}

impl From<serde_json::Error> for NotifyError {
    fn from(e: serde_json::Error) -> Self {
        Self::Encode(e.to_string())
    }
}

/// 名前設定のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetNameError {
    #[error(transparent)]
    InvalidName(#[from] ValueObjectError),

    #[error("Name '{0}' is already taken")]
    NameTaken(String),

    #[error(transparent)]
    Internal(#[from] NotifyError),
}

impl From<RepositoryError> for SetNameError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NameTaken(name) => Self::NameTaken(name),
            RepositoryError::NameInvalid(invalid) => Self::InvalidName(invalid),
        }
    }
}

/// メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error("Please set your name first")]
    NameNotSet,

    #[error(transparent)]
    InvalidBody(#[from] ValueObjectError),

    #[error(transparent)]
    Internal(#[from] NotifyError),
}
