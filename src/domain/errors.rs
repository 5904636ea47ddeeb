// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the storage crate.
//!
//! This module defines the error types that can occur when working with storage
//! backends and filters. All errors use `thiserror` for proper error handling and
//! conversion.

use thiserror::Error;

/// The main error type for storage operations.
///
/// Errors raised by a backend or a filter travel through the filtering layer
/// unchanged. It is marked as `#[non_exhaustive]` to allow for future additions
/// without breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use filtercfg::domain::errors::StorageError;
///
/// fn read_entry() -> Result<String, StorageError> {
///     Err(StorageError::NotFound {
///         name: "system.site".to_string(),
///     })
/// }
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    /// A backend required an entry that does not exist.
    #[error("Configuration entry not found: {name}")]
    NotFound {
        /// The entry name that was not found
        name: String,
    },

    /// An error occurred in a storage backend.
    #[error("Storage backend '{backend}' error: {message}")]
    BackendError {
        /// The name of the backend that encountered the error
        backend: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error raised by a storage filter.
    #[error("Storage filter '{filter}' error: {message}")]
    FilterError {
        /// The name of the filter that raised the error
        filter: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to encode or decode a configuration entry.
    #[error("Failed to encode or decode configuration: {message}")]
    Codec {
        /// The error message
        message: String,
        /// The underlying codec error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An entry name was rejected by a backend.
    #[error("Invalid configuration name '{name}': {reason}")]
    InvalidName {
        /// The rejected name
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// A filtering storage was built without a backend.
    #[error("No storage backend was provided")]
    MissingBackend,

    /// An I/O error occurred while accessing storage.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl StorageError {
    /// Creates a `BackendError` without an underlying cause.
    pub fn backend(backend: impl Into<String>, message: impl Into<String>) -> Self {
        StorageError::BackendError {
            backend: backend.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Creates a `FilterError` without an underlying cause.
    pub fn filter(filter: impl Into<String>, message: impl Into<String>) -> Self {
        StorageError::FilterError {
            filter: filter.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Creates a `Codec` error from a `serde_yaml` error.
    pub fn from_yaml_error(message: impl Into<String>, err: serde_yaml::Error) -> Self {
        StorageError::Codec {
            message: message.into(),
            source: Some(Box::new(err)),
        }
    }
}

/// A specialized Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
