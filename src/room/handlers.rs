use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument, warn};

use super::errors::RoomError;
use super::types::{
    AckResponse, ClipboardClearRequest, ClipboardResponse, ClipboardSaveRequest,
    RoomCreateRequest, RoomCreateResponse, RoomLoginRequest, RoomLoginResponse,
};
use crate::shared::{AppError, AppState};

/// HTTP handler for creating a new room
///
/// POST /api/rooms/create
/// Returns the generated room id
#[instrument(name = "create_room", skip_all)]
pub async fn create_room(
    State(state): State<AppState>,
    Json(request): Json<RoomCreateRequest>,
) -> Result<Json<RoomCreateResponse>, AppError> {
    info!("Creating new room");

    let room_id = state.room_service.create_room(&request.password).await?;

    info!(room_id = %room_id, "Room created successfully");

    Ok(Json(RoomCreateResponse {
        success: true,
        room_id,
        message: "Room created successfully".to_string(),
    }))
}

/// HTTP handler for logging into a room
///
/// POST /api/rooms/login
/// Returns the current clipboard text when the password verifies
#[instrument(name = "login_room", skip_all, fields(room_id = %request.room_id))]
pub async fn login_room(
    State(state): State<AppState>,
    Json(request): Json<RoomLoginRequest>,
) -> Result<Json<RoomLoginResponse>, AppError> {
    let clipboard_text = state
        .room_service
        .login(&request.room_id, &request.password)
        .await
        .inspect_err(|e| {
            // Internal faults are logged once, when turned into a 500
            if matches!(e, RoomError::NotFound | RoomError::AuthFailed) {
                warn!(error = %e, "Login rejected");
            }
        })?;

    info!("Login successful");

    Ok(Json(RoomLoginResponse {
        success: true,
        message: "Login successful".to_string(),
        clipboard_text,
    }))
}

/// HTTP handler for reading a room's clipboard
///
/// GET /api/rooms/{room_id}/clipboard
#[instrument(name = "get_clipboard", skip(state))]
pub async fn get_clipboard(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<ClipboardResponse>, AppError> {
    let clipboard_text = state.room_service.get_clipboard(&room_id).await?;

    info!(text_len = clipboard_text.len(), "Clipboard fetched");

    Ok(Json(ClipboardResponse {
        success: true,
        clipboard_text,
    }))
}

/// HTTP handler for replacing a room's clipboard
///
/// POST /api/rooms/clipboard/save
#[instrument(
    name = "save_clipboard",
    skip_all,
    fields(room_id = %request.room_id, text_len = request.text.len())
)]
pub async fn save_clipboard(
    State(state): State<AppState>,
    Json(request): Json<ClipboardSaveRequest>,
) -> Result<Json<AckResponse>, AppError> {
    state
        .room_service
        .save_clipboard(&request.room_id, &request.text)
        .await?;

    info!("Clipboard saved");

    Ok(Json(AckResponse::ok("Clipboard saved successfully")))
}

/// HTTP handler for clearing a room's clipboard
///
/// POST /api/rooms/clipboard/clear
#[instrument(name = "clear_clipboard", skip_all, fields(room_id = %request.room_id))]
pub async fn clear_clipboard(
    State(state): State<AppState>,
    Json(request): Json<ClipboardClearRequest>,
) -> Result<Json<AckResponse>, AppError> {
    state.room_service.clear_clipboard(&request.room_id).await?;

    info!("Clipboard cleared");

    Ok(Json(AckResponse::ok("Clipboard cleared successfully")))
}
