//! Error types for the Leave Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the registry, ledger and stores can report.

use thiserror::Error;

/// Broad classification of an [`EngineError`].
///
/// The boundary layer uses this to pick a status code; callers use it to
/// decide whether a failure is user-correctable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or missing input.
    Validation,
    /// A referenced entity does not exist.
    NotFound,
    /// The request contradicts current state (overlap, already decided).
    Conflict,
    /// The underlying store failed.
    Storage,
    /// Startup configuration could not be loaded.
    Config,
}

/// The main error type for the Leave Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use leave_engine::error::{EngineError, ErrorKind};
///
/// let error = EngineError::Conflict {
///     message: "Leave request 3 has already been decided".to_string(),
/// };
/// assert_eq!(error.kind(), ErrorKind::Conflict);
/// assert_eq!(error.to_string(), "Leave request 3 has already been decided");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Input was missing, empty or malformed.
    #[error("{message}")]
    Validation {
        /// A description of what was invalid.
        message: String,
    },

    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity that was looked up (e.g. "Employee").
        entity: &'static str,
        /// The identifier that was not found.
        id: String,
    },

    /// The operation conflicts with existing state.
    #[error("{message}")]
    Conflict {
        /// A description of the conflict.
        message: String,
    },

    /// The backing store failed to read or write.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a not-found error for the given entity and id.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Creates a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Creates a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Returns the broad classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::Validation { .. } => ErrorKind::Validation,
            EngineError::NotFound { .. } => ErrorKind::NotFound,
            EngineError::Conflict { .. } => ErrorKind::Conflict,
            EngineError::Storage { .. } => ErrorKind::Storage,
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ErrorKind::Config
            }
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
