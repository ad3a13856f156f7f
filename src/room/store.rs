use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, instrument, warn};

use super::{errors::StoreError, models::RoomRecord};

/// Trait for room persistence
///
/// Clipboard mutations are single atomic operations at the store level: callers
/// never read-then-write, and concurrent writers resolve last-write-wins.
#[async_trait]
pub trait RoomStore {
    /// Prepares the backing store (schema, connections). Called once at startup.
    async fn open(&self) -> Result<(), StoreError> {
        Ok(())
    }

    /// Releases the backing store. Called once at shutdown.
    async fn close(&self) {}

    /// Inserts a new room; fails with `StoreError::Conflict` if the id exists
    async fn create(&self, room: &RoomRecord) -> Result<(), StoreError>;

    async fn find_by_id(&self, room_id: &str) -> Result<Option<RoomRecord>, StoreError>;

    /// Atomically replaces the clipboard text and refreshes `updated_at`.
    /// Returns whether a room matched.
    async fn update_clipboard_text(&self, room_id: &str, text: &str)
        -> Result<bool, StoreError>;

    /// Same contract as `update_clipboard_text` with the empty string
    async fn clear_clipboard_text(&self, room_id: &str) -> Result<bool, StoreError>;
}

/// In-memory implementation of RoomStore for development and testing
///
/// Data is lost when the process exits.
pub struct InMemoryRoomStore {
    rooms: Mutex<HashMap<String, RoomRecord>>,
}

impl Default for InMemoryRoomStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRoomStore {
    /// Creates a new empty in-memory store
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the current number of rooms in the store
    pub fn room_count(&self) -> Result<usize, StoreError> {
        Ok(self.rooms()?.len())
    }

    fn rooms(&self) -> Result<MutexGuard<'_, HashMap<String, RoomRecord>>, StoreError> {
        self.rooms
            .lock()
            .map_err(|_| StoreError::Unavailable("room map lock poisoned".to_string()))
    }

    fn set_text(&self, room_id: &str, text: &str) -> Result<bool, StoreError> {
        let mut rooms = self.rooms()?;
        match rooms.get_mut(room_id) {
            Some(room) => {
                room.set_clipboard_text(text.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl RoomStore for InMemoryRoomStore {
    #[instrument(skip(self, room), fields(room_id = %room.room_id))]
    async fn create(&self, room: &RoomRecord) -> Result<(), StoreError> {
        debug!("Creating room in memory");

        let mut rooms = self.rooms()?;
        if rooms.contains_key(&room.room_id) {
            warn!("Room already exists in memory");
            return Err(StoreError::Conflict(room.room_id.clone()));
        }
        rooms.insert(room.room_id.clone(), room.clone());

        debug!("Room created successfully in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, room_id: &str) -> Result<Option<RoomRecord>, StoreError> {
        let room = self.rooms()?.get(room_id).cloned();

        match &room {
            Some(_) => debug!("Room found in memory"),
            None => debug!("Room not found in memory"),
        }

        Ok(room)
    }

    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn update_clipboard_text(
        &self,
        room_id: &str,
        text: &str,
    ) -> Result<bool, StoreError> {
        let matched = self.set_text(room_id, text)?;
        debug!(matched, "Clipboard text updated in memory");
        Ok(matched)
    }

    #[instrument(skip(self))]
    async fn clear_clipboard_text(&self, room_id: &str) -> Result<bool, StoreError> {
        let matched = self.set_text(room_id, "")?;
        debug!(matched, "Clipboard text cleared in memory");
        Ok(matched)
    }
}

const CREATE_ROOMS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS rooms (
    room_id        TEXT PRIMARY KEY,
    password_hash  TEXT NOT NULL,
    clipboard_text TEXT NOT NULL DEFAULT '',
    created_at     TIMESTAMPTZ NOT NULL,
    updated_at     TIMESTAMPTZ NOT NULL
)
"#;

/// PostgreSQL implementation of RoomStore
pub struct PostgresRoomStore {
    pool: PgPool,
}

impl PostgresRoomStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects a pool to `database_url`
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to connect to database");
                StoreError::Unavailable(e.to_string())
            })?;

        Ok(Self::new(pool))
    }

    async fn set_text(&self, room_id: &str, text: &str) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE rooms SET clipboard_text = $2, updated_at = $3 WHERE room_id = $1",
        )
        .bind(room_id)
        .bind(text)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, room_id = %room_id, "Failed to update clipboard in database");
            StoreError::Unavailable(e.to_string())
        })?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl RoomStore for PostgresRoomStore {
    #[instrument(skip(self))]
    async fn open(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_ROOMS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to prepare rooms table");
                StoreError::Unavailable(e.to_string())
            })?;

        info!("Rooms table ready");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }

    #[instrument(skip(self, room), fields(room_id = %room.room_id))]
    async fn create(&self, room: &RoomRecord) -> Result<(), StoreError> {
        debug!("Creating room in database");

        sqlx::query(
            "INSERT INTO rooms (room_id, password_hash, clipboard_text, created_at, updated_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&room.room_id)
        .bind(&room.password_hash)
        .bind(&room.clipboard_text)
        .bind(room.created_at)
        .bind(room.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                warn!("Room already exists in database");
                StoreError::Conflict(room.room_id.clone())
            }
            _ => {
                warn!(error = %e, "Failed to create room in database");
                StoreError::Unavailable(e.to_string())
            }
        })?;

        debug!("Room created successfully in database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, room_id: &str) -> Result<Option<RoomRecord>, StoreError> {
        let room = sqlx::query_as::<_, RoomRecord>(
            "SELECT room_id, password_hash, clipboard_text, created_at, updated_at FROM rooms WHERE room_id = $1",
        )
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch room from database");
            StoreError::Unavailable(e.to_string())
        })?;

        match &room {
            Some(_) => debug!("Room found in database"),
            None => debug!("Room not found in database"),
        }

        Ok(room)
    }

    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn update_clipboard_text(
        &self,
        room_id: &str,
        text: &str,
    ) -> Result<bool, StoreError> {
        self.set_text(room_id, text).await
    }

    #[instrument(skip(self))]
    async fn clear_clipboard_text(&self, room_id: &str) -> Result<bool, StoreError> {
        self.set_text(room_id, "").await
    }
}
