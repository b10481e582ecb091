//! Error types for the Cinedex plugin.
//!
//! Two families live here. [`NetworkFailure`] describes why a single catalog
//! fetch did not produce a usable payload; the discovery core absorbs it and
//! degrades the view instead of propagating it. [`CinedexError`] covers the
//! failures outside the core (configuration, themes, URLs, I/O) and is what
//! the crate-wide [`Result`] alias carries.

use thiserror::Error;

/// Why a catalog fetch failed.
///
/// Every variant is terminal for the request it belongs to: the core never
/// retries on its own. A timeout reported by the host is a `Transport`
/// failure like any other.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkFailure {
    /// The catalog answered with a non-success HTTP status.
    #[error("catalog returned HTTP {status}")]
    Status {
        /// HTTP status code reported by the host.
        status: u16,
    },

    /// The request never produced a response (host error, permission denied).
    #[error("catalog unreachable: {0}")]
    Transport(String),

    /// The response body could not be turned into the expected shape.
    #[error("malformed catalog payload: {0}")]
    Decode(String),
}

/// The main error type for Cinedex operations outside the discovery core.
///
/// # Examples
///
/// ```
/// use cinedex::domain::CinedexError;
///
/// fn validate_limit(limit: u32) -> Result<u32, CinedexError> {
///     if limit == 0 {
///         return Err(CinedexError::Config("limit must be positive".to_string()));
///     }
///     Ok(limit)
/// }
///
/// assert!(validate_limit(0).is_err());
/// ```
#[derive(Debug, Error)]
pub enum CinedexError {
    /// A catalog fetch failed.
    #[error("Catalog error: {0}")]
    Network(#[from] NetworkFailure),

    /// The configured catalog URL is not a valid base URL.
    #[error("Invalid catalog URL: {0}")]
    Url(#[from] url::ParseError),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for Cinedex operations.
pub type Result<T> = std::result::Result<T, CinedexError>;
