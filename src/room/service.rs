use std::sync::Arc;

use super::{
    errors::{RoomError, StoreError},
    generators::{RandomRoomIdGenerator, RoomIdGenerator},
    models::RoomRecord,
    password::PasswordHasher,
    store::RoomStore,
};

/// Tunables for room operations
#[derive(Debug, Clone)]
pub struct RoomSettings {
    /// Upper bound on clipboard text size in bytes; `None` means unbounded
    pub max_clipboard_bytes: Option<usize>,
    /// How many fresh ids `create_room` tries before giving up on conflicts
    pub max_create_attempts: u32,
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            max_clipboard_bytes: None,
            max_create_attempts: 3,
        }
    }
}

/// Service for room access control and clipboard state
///
/// Every operation is request-scoped and returns a typed outcome; the only shared
/// mutable state is behind the store's atomic per-room primitives. No lock is held
/// across two store calls.
///
/// `save_clipboard` and `clear_clipboard` do not re-check the password: knowing the
/// room id is enough to overwrite or erase its clipboard. `login` issues no session.
pub struct RoomService {
    store: Arc<dyn RoomStore + Send + Sync>,
    hasher: PasswordHasher,
    id_generator: Arc<dyn RoomIdGenerator>,
    settings: RoomSettings,
}

impl RoomService {
    pub fn new(store: Arc<dyn RoomStore + Send + Sync>, hasher: PasswordHasher) -> Self {
        Self {
            store,
            hasher,
            id_generator: Arc::new(RandomRoomIdGenerator::new()),
            settings: RoomSettings::default(),
        }
    }

    pub fn with_id_generator(mut self, id_generator: Arc<dyn RoomIdGenerator>) -> Self {
        self.id_generator = id_generator;
        self
    }

    pub fn with_settings(mut self, settings: RoomSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &RoomSettings {
        &self.settings
    }

    /// Creates a room protected by `password` and returns its new id
    ///
    /// A store-level id conflict triggers regeneration, up to
    /// `max_create_attempts` ids in total.
    pub async fn create_room(&self, password: &str) -> Result<String, RoomError> {
        if password.is_empty() {
            return Err(RoomError::ValidationFailed(
                "Password must not be empty".to_string(),
            ));
        }

        let password_hash = self.hash_password(password).await?;

        for _ in 0..self.settings.max_create_attempts.max(1) {
            let room_id = self.id_generator.generate();
            let room = RoomRecord::new(room_id.clone(), password_hash.clone());

            match self.store.create(&room).await {
                Ok(()) => return Ok(room_id),
                Err(StoreError::Conflict(_)) => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(RoomError::Internal(format!(
            "no unique room id after {} attempts",
            self.settings.max_create_attempts.max(1)
        )))
    }

    /// Verifies `password` for the room and returns its clipboard text
    ///
    /// Existence is checked before the password, so an unknown id is always
    /// `NotFound` and never `AuthFailed`.
    pub async fn login(&self, room_id: &str, password: &str) -> Result<String, RoomError> {
        let room = self.find_room(room_id).await?;

        if !self.verify_password(password, room.password_hash).await? {
            return Err(RoomError::AuthFailed);
        }

        Ok(room.clipboard_text)
    }

    pub async fn get_clipboard(&self, room_id: &str) -> Result<String, RoomError> {
        let room = self.find_room(room_id).await?;
        Ok(room.clipboard_text)
    }

    pub async fn save_clipboard(&self, room_id: &str, text: &str) -> Result<(), RoomError> {
        if let Some(limit) = self.settings.max_clipboard_bytes {
            if text.len() > limit {
                return Err(RoomError::ValidationFailed(format!(
                    "Clipboard text exceeds {limit} bytes"
                )));
            }
        }

        match self.store.update_clipboard_text(room_id, text).await? {
            true => Ok(()),
            false => Err(RoomError::NotFound),
        }
    }

    pub async fn clear_clipboard(&self, room_id: &str) -> Result<(), RoomError> {
        match self.store.clear_clipboard_text(room_id).await? {
            true => Ok(()),
            false => Err(RoomError::NotFound),
        }
    }

    async fn find_room(&self, room_id: &str) -> Result<RoomRecord, RoomError> {
        self.store
            .find_by_id(room_id)
            .await?
            .ok_or(RoomError::NotFound)
    }

    // Argon2 blocks for its whole cost; run it on the blocking pool.
    async fn hash_password(&self, password: &str) -> Result<String, RoomError> {
        let hasher = self.hasher.clone();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| RoomError::Internal(format!("hashing task failed: {e}")))?
            .map_err(|e| RoomError::Internal(format!("password hash failure: {e}")))
    }

    async fn verify_password(
        &self,
        password: &str,
        password_hash: String,
    ) -> Result<bool, RoomError> {
        let hasher = self.hasher.clone();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &password_hash))
            .await
            .map_err(|e| RoomError::Internal(format!("verification task failed: {e}")))
    }
}
