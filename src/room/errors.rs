use thiserror::Error;

/// Failures reported by a `RoomStore` implementation
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Room id already exists: {0}")]
    Conflict(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Outcome of a failed `RoomService` operation
#[derive(Debug, Error)]
pub enum RoomError {
    #[error("Room not found")]
    NotFound,

    #[error("Invalid password")]
    AuthFailed,

    #[error("Validation error: {0}")]
    ValidationFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for RoomError {
    fn from(error: StoreError) -> Self {
        RoomError::Internal(error.to_string())
    }
}
