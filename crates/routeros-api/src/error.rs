//! Error types for RouterOS API queries.
//!
//! Field-level decode problems never surface here; they are resolved to
//! fallback values inside [`crate::decode`]. Everything in [`RosError`] is
//! reported to the immediate caller.

use std::io;
use thiserror::Error;

/// Result type alias for RouterOS API operations.
pub type RosResult<T> = Result<T, RosError>;

/// errno-style status codes, for callers bridging to status-code APIs.
pub mod status {
    pub const EIO: i32 = 5;
    pub const ENOMEM: i32 = 12;
    pub const EINVAL: i32 = 22;
    pub const ECANCELED: i32 = 125;
}

/// Errors that can occur while issuing a query or materializing its reply.
#[derive(Debug, Error)]
pub enum RosError {
    /// The caller passed an argument the dispatcher cannot use.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the argument.
        message: String,
    },

    /// A record list could not be allocated.
    #[error("Out of memory while materializing reply records")]
    OutOfMemory,

    /// The dispatcher or transport reported a failure for a command.
    #[error("Query '{command}' failed: {message}")]
    Query {
        /// The command that failed (e.g., "/interface/print").
        command: String,
        /// Error message from the dispatcher.
        message: String,
    },

    /// A reply handler (user callback) asked to abort the query.
    #[error("Reply handler failed: {message}")]
    Handler {
        /// Error message.
        message: String,
    },

    /// Configuration validation error.
    #[error("Invalid configuration for {field}: {message}")]
    InvalidConfig {
        /// The field that failed validation.
        field: String,
        /// Error message.
        message: String,
    },

    /// A reply transcript could not be parsed.
    #[error("Transcript line {line}: {message}")]
    Transcript {
        /// 1-based line number.
        line: usize,
        /// Error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl RosError {
    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a query failure.
    pub fn query(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Query {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Creates a handler failure.
    pub fn handler(message: impl Into<String>) -> Self {
        Self::Handler {
            message: message.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a transcript parse error.
    pub fn transcript(line: usize, message: impl Into<String>) -> Self {
        Self::Transcript {
            line,
            message: message.into(),
        }
    }

    /// Returns the errno-style status code for this error.
    pub fn status_code(&self) -> i32 {
        match self {
            RosError::InvalidArgument { .. }
            | RosError::InvalidConfig { .. }
            | RosError::Transcript { .. } => status::EINVAL,
            RosError::OutOfMemory => status::ENOMEM,
            RosError::Query { .. } => status::EIO,
            RosError::Handler { .. } => status::ECANCELED,
            RosError::Io(e) => e.raw_os_error().unwrap_or(status::EIO),
        }
    }

    /// Returns true if re-issuing the same query might succeed.
    ///
    /// This layer never retries on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RosError::Query { .. } | RosError::Io(_))
    }
}
