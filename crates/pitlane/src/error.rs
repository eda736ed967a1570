//! Error types for pitlane.
//!
//! Every fallible operation in the crate returns [`Error`]. The variants fall
//! into three groups that the HTTP layer maps onto status codes: lookups that
//! found nothing, requests that were rejected before touching the store, and
//! everything else (store, configuration and I/O failures).

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for pitlane operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Lookup Errors ===
    /// No row with the given primary key exists.
    #[error("{resource} {id} not found")]
    NotFound {
        /// Name of the resource that was looked up.
        resource: &'static str,
        /// The requested primary key.
        id: i64,
    },

    /// A page number past the end of the result set was requested.
    #[error("invalid page: {page}")]
    InvalidPage {
        /// The requested page number.
        page: u32,
    },

    // === Request Errors ===
    /// A filter, ordering or pagination parameter was malformed.
    #[error("{message}")]
    Validation {
        /// Description of the rejected parameter.
        message: String,
    },

    // === Storage Errors ===
    /// Failed to open the database.
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

    /// A query named a field the table does not expose.
    #[error("table '{table}' has no field '{field}'")]
    UnknownField {
        /// The table being queried.
        table: &'static str,
        /// The field that was requested.
        field: String,
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
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for pitlane operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a not-found error for the given resource and id.
    #[must_use]
    pub fn not_found(resource: &'static str, id: i64) -> Self {
        Self::NotFound { resource, id }
    }

    /// Create a request validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error means the requested row or page does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::InvalidPage { .. })
    }

    /// Check if this error was raised while validating request parameters.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
