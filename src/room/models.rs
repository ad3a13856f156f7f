use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the rooms table (one document per room)
///
/// Not `Serialize`: `password_hash` must never reach a response body.
#[derive(Debug, Clone, FromRow)]
pub struct RoomRecord {
    pub room_id: String,       // 128-bit random token rendered as hex
    pub password_hash: String, // Argon2id PHC string, never leaves the server
    pub clipboard_text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RoomRecord {
    /// Creates a new room record with an empty clipboard
    pub fn new(room_id: String, password_hash: String) -> Self {
        let now = Utc::now();

        Self {
            room_id,
            password_hash,
            clipboard_text: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the clipboard text and refreshes `updated_at`
    pub fn set_clipboard_text(&mut self, text: String) {
        self.clipboard_text = text;
        self.updated_at = Utc::now();
    }
}
