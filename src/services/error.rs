use thiserror::Error;

use crate::application::error::ApplicationError;

/// Failure kinds reported by an object store gateway.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Transient storage error: {0}")]
    Transient(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),
}

impl StorageError {
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, StorageError::PermissionDenied(_))
    }
}

impl From<StorageError> for ApplicationError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::InvalidCredentials(msg) => {
                ApplicationError::InternalError(format!("Storage configuration error: {}", msg))
            }
            StorageError::PermissionDenied(msg)
            | StorageError::NotFound(msg)
            | StorageError::Transient(msg) => ApplicationError::StorageUnavailable(msg),
        }
    }
}
