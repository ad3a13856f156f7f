use axum::Router;
use std::sync::Arc;

use clipboard_rooms::{
    build_router, AppState, InMemoryRoomStore, PasswordHasher, RoomService, RoomSettings,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub app: Router,
    pub store: Arc<InMemoryRoomStore>,
}

pub struct TestSetupBuilder {
    settings: RoomSettings,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            settings: RoomSettings::default(),
        }
    }

    pub fn with_max_clipboard_bytes(mut self, limit: usize) -> Self {
        self.settings.max_clipboard_bytes = Some(limit);
        self
    }

    pub fn build(self) -> TestSetup {
        let store = Arc::new(InMemoryRoomStore::new());
        // Minimum Argon2 cost keeps the suite fast
        let hasher = PasswordHasher::from_cost(8, 1, 1).unwrap();
        let service = RoomService::new(store.clone(), hasher).with_settings(self.settings);

        TestSetup {
            app: build_router(AppState::new(Arc::new(service))),
            store,
        }
    }
}
