use serde::{Deserialize, Serialize};

/// Request payload for creating a new room
///
/// No `Debug`: the plaintext password must not end up in logs.
#[derive(Deserialize)]
pub struct RoomCreateRequest {
    pub password: String,
}

/// Request payload for logging into an existing room
#[derive(Deserialize)]
pub struct RoomLoginRequest {
    pub room_id: String,
    pub password: String,
}

/// Request payload for replacing a room's clipboard text
#[derive(Debug, Deserialize)]
pub struct ClipboardSaveRequest {
    pub room_id: String,
    pub text: String,
}

/// Request payload for clearing a room's clipboard text
#[derive(Debug, Deserialize)]
pub struct ClipboardClearRequest {
    pub room_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoomCreateResponse {
    pub success: bool,
    pub room_id: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoomLoginResponse {
    pub success: bool,
    pub message: String,
    pub clipboard_text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClipboardResponse {
    pub success: bool,
    pub clipboard_text: String,
}

/// Acknowledgement for clipboard save and clear
#[derive(Debug, Serialize, Deserialize)]
pub struct AckResponse {
    pub success: bool,
    pub message: String,
}

impl AckResponse {
    pub fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}
