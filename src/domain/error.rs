//! Error types for cinesearch.
//!
//! This module defines the centralized error type [`CineSearchError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for cinesearch operations.
///
/// Catalog failures and key-value storage failures are the two kinds the
/// search and favorites components recover from locally. The remaining variants
/// only surface while the application is being wired together.
///
/// # Examples
///
/// ```
/// use cinesearch::CineSearchError;
///
/// fn read_favorites() -> Result<(), CineSearchError> {
///     Err(CineSearchError::Storage("failed to read file".to_string()))
/// }
///
/// assert!(read_favorites().unwrap_err().is_storage());
/// ```
#[derive(Debug, Error)]
pub enum CineSearchError {
    /// Request to the movie catalog failed.
    ///
    /// Covers transport errors, timeouts, non-success HTTP statuses and
    /// responses that could not be decoded.
    #[error("Remote fetch error: {0}")]
    RemoteFetch(String),

    /// Key-value storage operation failed.
    ///
    /// Occurs when reading from or writing to the storage backend fails.
    /// The string contains a description of what went wrong.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when required configuration values are missing or malformed.
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CineSearchError {
    /// Returns `true` for catalog failures.
    #[must_use]
    pub const fn is_remote_fetch(&self) -> bool {
        matches!(self, Self::RemoteFetch(_))
    }

    /// Returns `true` for key-value storage failures.
    #[must_use]
    pub const fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

/// A specialized `Result` type for cinesearch operations.
///
/// This is a type alias for `std::result::Result<T, CineSearchError>` that simplifies
/// function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, CineSearchError>;
