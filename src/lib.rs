// Library crate for the room clipboard server
// This file exposes the public API for the binary and integration tests

pub mod config;
pub mod health;
pub mod room;
pub mod shared;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// Re-export commonly used types for easier access in tests
pub use config::AppConfig;
pub use room::{
    errors::{RoomError, StoreError},
    models::RoomRecord,
    password::PasswordHasher,
    service::{RoomService, RoomSettings},
    store::{InMemoryRoomStore, PostgresRoomStore, RoomStore},
};
pub use shared::{AppError, AppState};

// Room id, field names and braces around the clipboard text
const SAVE_BODY_OVERHEAD: usize = 16 * 1024;
// Worst-case JSON escaping (`\u0000`) of one byte of text
const JSON_ESCAPE_FACTOR: usize = 6;

/// Request body limit matching the configured clipboard size
///
/// Without a configured size the clipboard is unbounded, so axum's default
/// body limit is lifted as well. With one, oversized text still reaches the
/// service and is rejected there as a validation error.
fn body_limit(max_clipboard_bytes: Option<usize>) -> DefaultBodyLimit {
    match max_clipboard_bytes {
        Some(limit) => DefaultBodyLimit::max(
            limit
                .saturating_mul(JSON_ESCAPE_FACTOR)
                .saturating_add(SAVE_BODY_OVERHEAD),
        ),
        None => DefaultBodyLimit::disable(),
    }
}

/// Builds the HTTP router for the clipboard API
pub fn build_router(app_state: AppState) -> Router {
    let body_limit = body_limit(app_state.room_service.settings().max_clipboard_bytes);

    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/rooms/create", post(room::create_room))
        .route("/api/rooms/login", post(room::login_room))
        .route("/api/rooms/:room_id/clipboard", get(room::get_clipboard))
        .route("/api/rooms/clipboard/save", post(room::save_clipboard))
        .route("/api/rooms/clipboard/clear", post(room::clear_clipboard))
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
