//! Conversion logic between DTOs and domain entities.

use parlor_shared::time::format_clock_time;

use crate::domain::{User, entity};
use crate::infrastructure::dto::{http as http_dto, websocket as dto};

// ========================================
// Domain Entity → DTO
// ========================================

impl From<&entity::ChatMessage> for dto::ServerMessage {
    fn from(model: &entity::ChatMessage) -> Self {
        Self {
            r#type: dto::MessageType::Message,
            from: model.from.as_str().to_string(),
            message: model.body.as_str().to_string(),
            time: format_clock_time(model.timestamp.value()),
            fd: Some(model.from_id.value()),
            history: None,
        }
    }
}

impl From<&User> for http_dto::UserDto {
    fn from(user: &User) -> Self {
        Self {
            fd: user.connection_id.value(),
            name: user.name.as_str().to_string(),
            joined_at: user.joined_at.value(),
            last_activity_at: user.last_activity_at.value(),
        }
    }
}
