//! Error types for corpdir.
//!
//! This module defines all error types used throughout the corpdir crate.
//! Validation errors are the transient, user-visible kind; storage errors are
//! absorbed by the persistence layer and only logged.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for corpdir operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    /// Writing a value would push the store past its quota.
    #[error("storage quota exceeded writing '{key}': {required} bytes needed, quota is {quota}")]
    QuotaExceeded {
        /// Key being written.
        key: String,
        /// Total bytes the store would hold after the write.
        required: usize,
        /// Configured quota in bytes.
        quota: usize,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Validation Errors ===
    /// An employee was submitted without a name.
    #[error("name is required")]
    EmptyName,

    /// An uploaded photo exceeds the size limit.
    #[error("photo must be less than {max} bytes (got {size})")]
    PhotoTooLarge {
        /// Size of the rejected file.
        size: u64,
        /// Largest accepted size.
        max: u64,
    },

    /// An uploaded file does not declare an image media type.
    #[error("please upload an image file (got {media_type})")]
    NotAnImage {
        /// The declared media type.
        media_type: String,
    },

    /// The edit-mode password did not match.
    #[error("incorrect password")]
    IncorrectPassword,

    /// A mutating action was attempted while edit mode is locked.
    #[error("edit mode is locked")]
    EditLocked,

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for corpdir operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a photo size error.
    #[must_use]
    pub fn photo_too_large(size: u64, max: u64) -> Self {
        Self::PhotoTooLarge { size, max }
    }

    /// Create a wrong media type error.
    #[must_use]
    pub fn not_an_image(media_type: impl Into<String>) -> Self {
        Self::NotAnImage {
            media_type: media_type.into(),
        }
    }

    /// Check if this error is a user input problem rather than a system failure.
    ///
    /// Validation errors are reported as notices and never leave partial state.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyName
                | Self::PhotoTooLarge { .. }
                | Self::NotAnImage { .. }
                | Self::IncorrectPassword
                | Self::EditLocked
        )
    }
}
