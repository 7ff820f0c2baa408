//! Error handling for pcbkit
//!
//! The editor distinguishes three kinds of failure:
//! - Validation errors (bad user input, recoverable, shown as a message)
//! - Logic errors (a caller broke an invariant; these are defects)
//! - History corruption (undo/redo of a committed group failed)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Validation error type
///
/// Raised synchronously when user input or requested geometry is not acceptable.
/// The invoking editor state reports it and aborts the in-flight transaction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A length was negative where only unsigned values are allowed
    #[error("Length must not be negative: {value}nm")]
    NegativeLength {
        /// The rejected value in nanometres.
        value: i64,
    },

    /// A length was zero or negative where a strictly positive value is required
    #[error("Length must be greater than zero: {value}nm")]
    NonPositiveLength {
        /// The rejected value in nanometres.
        value: i64,
    },

    /// A name is empty or contains illegal characters
    #[error("Invalid name '{name}': {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// The reason the name is invalid.
        reason: String,
    },

    /// A geometry is not acceptable (e.g. degenerate outline)
    #[error("Invalid geometry: {reason}")]
    InvalidGeometry {
        /// The reason the geometry is invalid.
        reason: String,
    },

    /// A combination of values is not acceptable
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// The field holding the invalid value.
        field: String,
        /// The reason the value is invalid.
        reason: String,
    },
}

/// Main error type for pcbkit
#[derive(Error, Debug)]
pub enum Error {
    /// User-facing validation failure
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Programming-invariant violation (e.g. undo before execute)
    #[error("Logic error: {0}")]
    Logic(String),

    /// A domain handle no longer resolves to an object
    #[error("{kind} {uuid} not found")]
    NotFound {
        /// The kind of object that was looked up.
        kind: &'static str,
        /// The identifier that was looked up.
        uuid: uuid::Uuid,
    },

    /// Undo or redo of an already committed command failed
    #[error("Undo history corrupted while trying to {operation} '{text}': {reason}")]
    HistoryCorrupted {
        /// "undo" or "redo".
        operation: &'static str,
        /// Text of the command group being replayed.
        text: String,
        /// The underlying failure.
        reason: String,
    },

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a logic error from a message
    pub fn logic(msg: impl Into<String>) -> Self {
        Error::Logic(msg.into())
    }

    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Create a not-found error for a domain object
    pub fn not_found(kind: &'static str, uuid: uuid::Uuid) -> Self {
        Error::NotFound { kind, uuid }
    }

    /// Shortcut for an invalid value validation error
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Validation(ValidationError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        })
    }

    /// Check if this error should be shown to the user as a recoverable message
    pub fn is_user_error(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::Io(_) | Error::Other(_))
    }

    /// Check if this error indicates a broken invariant
    pub fn is_logic_error(&self) -> bool {
        matches!(self, Error::Logic(_) | Error::NotFound { .. })
    }

    /// Check if the undo history can no longer be trusted
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::HistoryCorrupted { .. })
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
