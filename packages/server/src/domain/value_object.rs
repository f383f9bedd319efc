//! 値オブジェクト
//!
//! 生の入力（トリム前の文字列や transport の整数ハンドル）を検証済みの型に変換します。
//! 生成に成功した値は常に不変条件を満たします。

use std::fmt;

use serde::Serialize;

use super::error::ValueObjectError;

/// 表示名の最大文字数
pub const MAX_DISPLAY_NAME_CHARS: usize = 20;

/// メッセージ本文の最大文字数
pub const MAX_MESSAGE_BODY_CHARS: usize = 500;

/// 接続 ID
///
/// transport が割り当てる不透明な整数ハンドル。接続が生きている間は再利用されません。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 表示名（トリム済み、1〜20 文字）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayName(String);

impl DisplayName {
    /// 生の入力をトリムして検証する
    pub fn new(raw: &str) -> Result<Self, ValueObjectError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::NameEmpty);
        }
        if trimmed.chars().count() > MAX_DISPLAY_NAME_CHARS {
            return Err(ValueObjectError::NameTooLong);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// メッセージ本文（トリム済み、1〜500 文字）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBody(String);

impl MessageBody {
    pub fn new(raw: &str) -> Result<Self, ValueObjectError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::MessageEmpty);
        }
        if trimmed.chars().count() > MAX_MESSAGE_BODY_CHARS {
            return Err(ValueObjectError::MessageTooLong);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unix タイムスタンプ（ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_is_trimmed() {
        // テスト項目: 表示名の前後の空白が除去される
        // given (前提条件):
        let raw = "  Alice \t";

        // when (操作):
        let name = DisplayName::new(raw);

        // then (期待する結果):
        assert_eq!(name.unwrap().as_str(), "Alice");
    }

    #[test]
    fn test_display_name_whitespace_only_is_empty() {
        // テスト項目: 空白のみの表示名は空として拒否される
        // given (前提条件):
        let raw = "   ";

        // when (操作):
        let result = DisplayName::new(raw);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::NameEmpty));
    }

    #[test]
    fn test_display_name_length_boundary() {
        // テスト項目: 20 文字は許可され、21 文字は拒否される
        // given (前提条件):
        let twenty = "a".repeat(20);
        let twenty_one = "a".repeat(21);

        // when (操作):
        let ok = DisplayName::new(&twenty);
        let too_long = DisplayName::new(&twenty_one);

        // then (期待する結果):
        assert!(ok.is_ok());
        assert_eq!(too_long, Err(ValueObjectError::NameTooLong));
    }

    #[test]
    fn test_display_name_counts_characters_not_bytes() {
        // テスト項目: マルチバイト文字は 1 文字として数えられる
        // given (前提条件):
        // 20 文字 / 60 バイト
        let raw = "あ".repeat(20);

        // when (操作):
        let result = DisplayName::new(&raw);

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[test]
    fn test_message_body_boundaries() {
        // テスト項目: 本文の空チェックと 500 文字の上限
        // given (前提条件):
        let max = "x".repeat(500);
        let over = "x".repeat(501);

        // when (操作) / then (期待する結果):
        assert_eq!(MessageBody::new(" \n "), Err(ValueObjectError::MessageEmpty));
        assert_eq!(MessageBody::new(&max).unwrap().as_str().len(), 500);
        assert_eq!(MessageBody::new(&over), Err(ValueObjectError::MessageTooLong));
    }

    #[test]
    fn test_connection_id_serializes_as_number() {
        // テスト項目: ConnectionId は JSON では素の数値になる
        // given (前提条件):
        let id = ConnectionId::new(42);

        // when (操作):
        let json = serde_json::to_string(&id).unwrap();

        // then (期待する結果):
        assert_eq!(json, "42");
    }
}
