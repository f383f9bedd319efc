//! WebSocket message DTOs.
//!
//! Inbound frames are JSON objects with an optional `type` (defaults to
//! `"message"`). Outbound frames always carry `type`, `from`, `message` and
//! `time`; `fd` is omitted on server-originated broadcasts and `history`
//! only appears on `history` frames.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::ConnectionId;

/// `from` value of every server-originated frame
pub const SERVER_SENDER: &str = "Server";

/// Raw inbound frame could not be used at all
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Invalid JSON format")]
    InvalidJson,
}

/// A syntactically valid inbound frame whose `type` has not been read yet
#[derive(Debug, Clone, PartialEq)]
pub struct InboundFrame(Map<String, Value>);

impl InboundFrame {
    /// Parse raw frame bytes.
    ///
    /// Anything other than a non-empty JSON object is rejected.
    pub fn parse(raw: &[u8]) -> Result<Self, DecodeError> {
        match serde_json::from_slice::<Value>(raw) {
            Ok(Value::Object(map)) if !map.is_empty() => Ok(Self(map)),
            _ => Err(DecodeError::InvalidJson),
        }
    }

    fn text_field(&self, key: &str) -> String {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    /// Read `type` and the fields its command needs.
    pub fn into_command(self) -> ClientCommand {
        let kind = match self.0.get("type") {
            None | Some(Value::Null) => "message".to_string(),
            Some(Value::String(kind)) => kind.clone(),
            Some(other) => other.to_string(),
        };

        match kind.as_str() {
            "set_name" => ClientCommand::SetName {
                name: self.text_field("name"),
            },
            "message" => ClientCommand::Message {
                message: self.text_field("message"),
            },
            "ping" => ClientCommand::Ping,
            _ => ClientCommand::Unknown { kind },
        }
    }
}

/// Closed set of inbound commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    SetName { name: String },
    Message { message: String },
    Ping,
    Unknown { kind: String },
}

/// Outbound frame type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    System,
    Message,
    Error,
    NameSet,
    Pong,
    History,
}

/// Outbound frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerMessage {
    pub r#type: MessageType,
    pub from: String,
    pub message: String,
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fd: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<ServerMessage>>,
}

impl ServerMessage {
    fn from_server(
        r#type: MessageType,
        message: impl Into<String>,
        time: impl Into<String>,
        fd: Option<ConnectionId>,
    ) -> Self {
        Self {
            r#type,
            from: SERVER_SENDER.to_string(),
            message: message.into(),
            time: time.into(),
            fd: fd.map(|id| id.value()),
            history: None,
        }
    }

    /// System notice; `target` is `None` for broadcasts
    pub fn system(
        message: impl Into<String>,
        time: impl Into<String>,
        target: Option<ConnectionId>,
    ) -> Self {
        Self::from_server(MessageType::System, message, time, target)
    }

    pub fn error(target: ConnectionId, message: impl Into<String>, time: impl Into<String>) -> Self {
        Self::from_server(MessageType::Error, message, time, Some(target))
    }

    pub fn name_set(target: ConnectionId, name: &str, time: impl Into<String>) -> Self {
        Self::from_server(
            MessageType::NameSet,
            format!("Welcome, {}!", name),
            time,
            Some(target),
        )
    }

    pub fn pong(target: ConnectionId, time: impl Into<String>) -> Self {
        Self::from_server(MessageType::Pong, "pong", time, Some(target))
    }

    pub fn history(
        target: ConnectionId,
        entries: Vec<ServerMessage>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            history: Some(entries),
            ..Self::from_server(MessageType::History, "Recent messages:", time, Some(target))
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(raw: &str) -> Result<ClientCommand, DecodeError> {
        InboundFrame::parse(raw.as_bytes()).map(InboundFrame::into_command)
    }

    #[test]
    fn test_parse_rejects_non_objects() {
        // テスト項目: JSON オブジェクト以外（空オブジェクト含む）は不正な JSON として扱われる
        // given (前提条件):
        let inputs = ["not json", "", "[]", "42", "\"set_name\"", "null", "{}"];

        // when (操作) / then (期待する結果):
        for input in inputs {
            assert_eq!(
                InboundFrame::parse(input.as_bytes()),
                Err(DecodeError::InvalidJson),
                "input: {input}"
            );
        }
    }

    #[test]
    fn test_known_commands() {
        // テスト項目: type ごとに対応するコマンドへ変換される
        // given (前提条件) / when (操作) / then (期待する結果):
        assert_eq!(
            command(r#"{"type":"set_name","name":" Alice "}"#),
            Ok(ClientCommand::SetName {
                name: " Alice ".to_string()
            })
        );
        assert_eq!(
            command(r#"{"type":"message","message":"hi"}"#),
            Ok(ClientCommand::Message {
                message: "hi".to_string()
            })
        );
        assert_eq!(command(r#"{"type":"ping"}"#), Ok(ClientCommand::Ping));
    }

    #[test]
    fn test_missing_type_defaults_to_message() {
        // テスト項目: type が無い（または null の）場合は message として扱われる
        // given (前提条件):
        let without_type = r#"{"message":"hello"}"#;
        let null_type = r#"{"type":null,"message":"hello"}"#;

        // when (操作) / then (期待する結果):
        let expected = Ok(ClientCommand::Message {
            message: "hello".to_string(),
        });
        assert_eq!(command(without_type), expected);
        assert_eq!(command(null_type), expected);
    }

    #[test]
    fn test_unknown_type() {
        // テスト項目: 未知の type は Unknown になり、文字列以外は JSON 表現で保持される
        // given (前提条件) / when (操作) / then (期待する結果):
        assert_eq!(
            command(r#"{"type":"dance"}"#),
            Ok(ClientCommand::Unknown {
                kind: "dance".to_string()
            })
        );
        assert_eq!(
            command(r#"{"type":7}"#),
            Ok(ClientCommand::Unknown {
                kind: "7".to_string()
            })
        );
    }

    #[test]
    fn test_non_string_fields_are_treated_as_empty() {
        // テスト項目: 文字列以外の name / message は空文字として扱われる
        // given (前提条件) / when (操作) / then (期待する結果):
        assert_eq!(
            command(r#"{"type":"set_name","name":12}"#),
            Ok(ClientCommand::SetName {
                name: String::new()
            })
        );
        assert_eq!(
            command(r#"{"type":"message"}"#),
            Ok(ClientCommand::Message {
                message: String::new()
            })
        );
    }

    #[test]
    fn test_broadcast_frame_omits_fd() {
        // テスト項目: サーバー発のブロードキャストには fd が含まれない
        // given (前提条件):
        let msg = ServerMessage::system("User 'Alice' joined the chat", "12:00:00", None);

        // when (操作):
        let json: Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();

        // then (期待する結果):
        assert_eq!(json["type"], "system");
        assert_eq!(json["from"], "Server");
        assert_eq!(json["message"], "User 'Alice' joined the chat");
        assert_eq!(json["time"], "12:00:00");
        assert!(json.get("fd").is_none());
        assert!(json.get("history").is_none());
    }

    #[test]
    fn test_history_frame_shape() {
        // テスト項目: history フレームは fd と history 配列を持つ
        // given (前提条件):
        let entry = ServerMessage {
            r#type: MessageType::Message,
            from: "Alice".to_string(),
            message: "hi".to_string(),
            time: "11:59:00".to_string(),
            fd: Some(3),
            history: None,
        };
        let msg = ServerMessage::history(ConnectionId::new(9), vec![entry], "12:00:00");

        // when (操作):
        let json: Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();

        // then (期待する結果):
        assert_eq!(json["type"], "history");
        assert_eq!(json["message"], "Recent messages:");
        assert_eq!(json["fd"], 9);
        assert_eq!(json["history"][0]["from"], "Alice");
        assert_eq!(json["history"][0]["fd"], 3);
        assert_eq!(json["history"][0]["type"], "message");
    }

    #[test]
    fn test_name_set_and_pong_frames() {
        // テスト項目: name_set / pong フレームの内容
        // given (前提条件):
        let id = ConnectionId::new(5);

        // when (操作):
        let name_set = ServerMessage::name_set(id, "Alice", "00:00:00");
        let pong = ServerMessage::pong(id, "00:00:00");

        // then (期待する結果):
        assert_eq!(name_set.r#type, MessageType::NameSet);
        assert_eq!(name_set.message, "Welcome, Alice!");
        assert_eq!(name_set.fd, Some(5));
        assert_eq!(pong.r#type, MessageType::Pong);
        assert_eq!(pong.message, "pong");
        assert_eq!(
            serde_json::to_value(&name_set).unwrap()["type"],
            "name_set"
        );
    }
}
