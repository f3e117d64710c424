//! Error types for lineisam core.

use std::io;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while building, listing, searching or verifying an index.
///
/// A key that is absent from the index is not an error: lookups report it as
/// `Ok(None)`.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Storage backend error.
    #[error("storage error: {0}")]
    Storage(#[from] lineisam_storage::StorageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The index file does not have the expected layout.
    #[error("invalid index format: {message}")]
    InvalidFormat {
        /// Description of the format issue.
        message: String,
    },

    /// The configured key length is unusable.
    #[error("invalid key length {key_length}: {message}")]
    InvalidKeyLength {
        /// The rejected key length.
        key_length: usize,
        /// Why it was rejected.
        message: String,
    },

    /// A search key cannot be compared against index keys.
    #[error("invalid search key: {message}")]
    InvalidKey {
        /// Why the key was rejected.
        message: String,
    },

    /// The configuration is inconsistent.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the problem.
        message: String,
    },
}

impl CoreError {
    /// Creates an invalid format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Creates an invalid key length error.
    pub fn invalid_key_length(key_length: usize, message: impl Into<String>) -> Self {
        Self::InvalidKeyLength {
            key_length,
            message: message.into(),
        }
    }

    /// Creates an invalid search key error.
    pub fn invalid_key(message: impl Into<String>) -> Self {
        Self::InvalidKey {
            message: message.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Returns true if this error reports a malformed index file.
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::InvalidFormat { .. })
    }
}
