//! Error types for catalog operations.

use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A request value failed validation before touching storage.
    #[error("{message}")]
    Validation {
        /// Description of the invalid value.
        message: String,
    },

    /// Resource not found. Covers absent documents, unparseable course
    /// identifiers, and out-of-range chapter ordinals alike; callers are
    /// not told which.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity that was not found (`course` or `chapter`).
        entity: &'static str,
        /// The identifier that was looked up.
        id: String,
    },

    /// A document already exists where a create-only write was requested.
    #[error("{entity} already exists: {id}")]
    AlreadyExists {
        /// The kind of entity.
        entity: &'static str,
        /// The conflicting identifier.
        id: String,
    },

    /// Storage operation failed.
    #[error("storage error: {message}")]
    Storage {
        /// Description of the storage failure.
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of the serialization failure.
        message: String,
    },
}

impl CatalogError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a course-not-found error.
    #[must_use]
    pub fn course_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "course",
            id: id.into(),
        }
    }

    /// Creates a chapter-not-found error.
    #[must_use]
    pub fn chapter_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "chapter",
            id: id.into(),
        }
    }
}

impl From<coursebook_core::Error> for CatalogError {
    fn from(value: coursebook_core::Error) -> Self {
        use coursebook_core::Error;
        match value {
            Error::NotFound(message) => Self::NotFound {
                entity: "document",
                id: message,
            },
            Error::Serialization { message } => Self::Serialization { message },
            Error::InvalidId { message } | Error::InvalidInput(message) => {
                Self::Validation { message }
            }
            Error::Storage { .. } | Error::Internal { .. } => Self::Storage {
                message: value.to_string(),
            },
        }
    }
}
