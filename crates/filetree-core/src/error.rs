//! Unified application error types for FileTree.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested node does not exist.
    NotFound,
    /// The request itself could not be parsed or is structurally invalid.
    Validation,
    /// The same id appears more than once in one import batch.
    DuplicateInBatch,
    /// A file was named as the parent of another node.
    FileCannotBeParent,
    /// An existing node was re-imported with a different type.
    TypeChangeForbidden,
    /// An item's url/size fields do not match its type.
    InvalidShape,
    /// A parent reference cannot be satisfied or would form a cycle.
    ImpossibleParentLink,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal error occurred.
    Internal,
}

impl ErrorKind {
    /// Whether this kind rejects an import batch (as opposed to a lookup
    /// miss or an infrastructure failure).
    pub fn is_batch_rejection(&self) -> bool {
        matches!(
            self,
            Self::DuplicateInBatch
                | Self::FileCannotBeParent
                | Self::TypeChangeForbidden
                | Self::InvalidShape
                | Self::ImpossibleParentLink
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Validation => write!(f, "VALIDATION_FAILED"),
            Self::DuplicateInBatch => write!(f, "DUPLICATE_IN_BATCH"),
            Self::FileCannotBeParent => write!(f, "FILE_CANNOT_BE_PARENT"),
            Self::TypeChangeForbidden => write!(f, "TYPE_CHANGE_FORBIDDEN"),
            Self::InvalidShape => write!(f, "INVALID_SHAPE"),
            Self::ImpossibleParentLink => write!(f, "IMPOSSIBLE_PARENT_LINK"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout FileTree.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a generic request validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a duplicate-in-batch rejection.
    pub fn duplicate_in_batch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateInBatch, message)
    }

    /// Create a file-cannot-be-parent rejection.
    pub fn file_cannot_be_parent(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::FileCannotBeParent, message)
    }

    /// Create a type-change rejection.
    pub fn type_change_forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TypeChangeForbidden, message)
    }

    /// Create an invalid-shape rejection.
    pub fn invalid_shape(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidShape, message)
    }

    /// Create an impossible-parent-link rejection.
    pub fn impossible_parent_link(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ImpossibleParentLink, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Internal, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::with_source(ErrorKind::Database, format!("Database error: {err}"), err)
    }
}
