//! Error types for safesql

use std::fmt;
use thiserror::Error;

/// Result type alias for safesql operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Error types produced while rendering or running SQL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SqlError {
    /// A declared type tag outside `integer`/`float`/`string`/`binary`.
    #[error("unexpected variable type: {0}")]
    UnknownPlaceholderType(String),

    /// The template and the argument list disagree on the number of values.
    #[error(
        "argument count mismatch: template has {placeholders} placeholder(s), {arguments} argument(s) given"
    )]
    ArgumentCountMismatch { placeholders: usize, arguments: usize },

    /// A value whose shape cannot be rendered as the requested kind.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Failure inside a driver collaborator (escaper or executor).
    #[error("Connection error: {0}")]
    Connection(String),

    /// A statement description that cannot produce valid SQL.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A fetch helper that needed a row or column did not get one.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration could not be parsed.
    #[error("Config error: {0}")]
    Config(String),
}

/// The error categories handed to an [`ErrorReporter`](crate::ErrorReporter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnknownPlaceholderType,
    ArgumentCountMismatch,
    TypeMismatch,
    ConnectionError,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::UnknownPlaceholderType => "unknown_placeholder_type",
            ErrorKind::ArgumentCountMismatch => "argument_count_mismatch",
            ErrorKind::TypeMismatch => "type_mismatch",
            ErrorKind::ConnectionError => "connection_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SqlError {
    /// Create a type mismatch error
    pub fn type_mismatch(expected: &'static str, found: &'static str) -> Self {
        Self::TypeMismatch { expected, found }
    }

    /// Create a connection error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// The reportable category of this error, if it has one.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::UnknownPlaceholderType(_) => Some(ErrorKind::UnknownPlaceholderType),
            Self::ArgumentCountMismatch { .. } => Some(ErrorKind::ArgumentCountMismatch),
            Self::TypeMismatch { .. } => Some(ErrorKind::TypeMismatch),
            Self::Connection(_) => Some(ErrorKind::ConnectionError),
            Self::Validation(_) | Self::NotFound(_) | Self::Config(_) => None,
        }
    }

    /// Check if this is a type mismatch error
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }

    /// Check if this is an argument count mismatch error
    pub fn is_argument_count_mismatch(&self) -> bool {
        matches!(self, Self::ArgumentCountMismatch { .. })
    }

    /// Check if this is a connection error
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
