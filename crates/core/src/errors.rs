//! Core error types for Forgefleet.
//!
//! This module defines storage-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.
//!
//! Errors can be wrapped with operation context via [`ErrorContext`]. The
//! wrapped cause stays reachable through [`Error::kind`] and
//! [`std::error::Error::source`], so callers classify failures without
//! matching on message text.

use forgefleet_workshop_api::WorkshopApiError;
use thiserror::Error;

use crate::commands::PublishError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the control plane.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Workshop platform request failed: {0}")]
    WorkshopApi(#[from] WorkshopApiError),

    #[error("Command publish failed: {0}")]
    Publish(#[from] PublishError),

    /// Removal refused because the server is live.
    #[error(
        "Cannot remove installation {installation_id}: active session {session_id} is {status}"
    )]
    ActiveSession {
        installation_id: String,
        session_id: String,
        status: String,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

/// Coarse classification of an [`Error`], looking through context wrappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced record does not exist.
    NotFound,
    /// Caller supplied malformed input.
    Validation,
    /// Operator configuration is incomplete; retrying will not help.
    Configuration,
    /// A collaborator (database, bus, workshop platform) failed.
    DependentSystem,
    /// The request is valid but the current state forbids it.
    BusinessRule,
    /// A concurrent request already claimed the same record.
    Conflict,
}

impl Error {
    /// Classifies this error by its root cause.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Context { source, .. } => source.kind(),
            Error::Database(DatabaseError::NotFound(_)) => ErrorKind::NotFound,
            Error::Database(DatabaseError::UniqueViolation(_)) => ErrorKind::Conflict,
            Error::Database(_) => ErrorKind::DependentSystem,
            Error::Validation(_) => ErrorKind::Validation,
            Error::Configuration(_) => ErrorKind::Configuration,
            Error::WorkshopApi(WorkshopApiError::NotFound(_)) => ErrorKind::NotFound,
            Error::WorkshopApi(_) | Error::Publish(_) => ErrorKind::DependentSystem,
            Error::ActiveSession { .. } => ErrorKind::BusinessRule,
            Error::Conflict(_) => ErrorKind::Conflict,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// The innermost error, skipping context wrappers.
    pub fn root(&self) -> &Error {
        match self {
            Error::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// Wraps this error with a description of the operation that failed.
    pub fn context(self, context: impl Into<String>) -> Self {
        Error::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Adds operation context to fallible results.
pub trait ErrorContext<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T, E: Into<Error>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| Into::<Error>::into(e).context(context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Into::<Error>::into(e).context(f()))
    }
}

/// Storage-agnostic error type for repository operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint was violated.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// A database transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),
}

/// Operator configuration that prevents resolving an installation path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("no volume strategy found for game {game_id}")]
    NoVolumeStrategy { game_id: String },

    #[error("volume strategy missing target_path (strategy {strategy_id})")]
    MissingTargetPath { strategy_id: String },

    #[error("addon missing installation_path (addon {addon_id})")]
    MissingInstallationPath { addon_id: String },

    #[error("addon installation_path escapes volume root: {path}")]
    PathEscapesVolume { path: String },

    #[error("addon installation_path resolves to the volume root: {path}")]
    PathIsVolumeRoot { path: String },
}

// === From implementations for common error types ===

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
