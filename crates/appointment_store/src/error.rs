//! Appointment store error types.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// The requested slot intersects an existing appointment.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Input rejected before reaching a backend.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Duplicate primary key.
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A persisted record could not be decoded.
    #[error("Corrupt record: {0}")]
    CorruptRecord(String),
}

impl StoreError {
    /// Creates a not found error.
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an already exists error.
    pub fn already_exists(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates the conflict error reported for a double booking.
    ///
    /// Backends that know which appointment was hit pass its id.
    pub fn overlap(existing: Option<Uuid>) -> Self {
        match existing {
            Some(id) => Self::Conflict(format!(
                "this time slot overlaps with an existing appointment ({id})"
            )),
            None => Self::Conflict(
                "this time slot overlaps with an existing appointment".to_string(),
            ),
        }
    }

    /// Returns true for failures of the storage layer itself.
    ///
    /// Not-found, conflict and validation outcomes are expected results the
    /// caller answers normally; everything else is an internal failure.
    pub fn is_storage(&self) -> bool {
        !matches!(
            self,
            Self::NotFound { .. } | Self::Conflict(_) | Self::Validation(_)
        )
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
