//! Error types for the Zellidex plugin.
//!
//! This module defines the centralized error type [`ZellidexError`] and a type alias
//! [`Result`] for convenient error handling throughout the plugin. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for Zellidex plugin operations.
///
/// Fetch failures (a non-success status or a body that does not decode) are the
/// only errors the catalog pipeline produces. They abort the page load that
/// raised them and are reported through `tracing`, never to the user.
///
/// # Examples
///
/// ```
/// use zellidex::ZellidexError;
///
/// let err = ZellidexError::HttpStatus {
///     url: "https://pokeapi.co/api/v2/pokemon/1/".to_string(),
///     status: 503,
/// };
/// assert!(err.to_string().contains("503"));
/// ```
#[derive(Debug, Error)]
pub enum ZellidexError {
    /// The API answered with a non-success HTTP status.
    #[error("Request to {url} failed with status {status}")]
    HttpStatus {
        /// Requested URL.
        url: String,
        /// Status code reported by the host.
        status: u16,
    },

    /// A response body could not be decoded into the expected shape.
    ///
    /// Automatically converts from `serde_json::Error` using the `#[from]` attribute.
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),
}

impl ZellidexError {
    /// Returns `true` for errors raised while fetching or decoding API data.
    #[must_use]
    pub const fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::HttpStatus { .. } | Self::Decode(_))
    }
}

/// A specialized `Result` type for Zellidex operations.
pub type Result<T> = std::result::Result<T, ZellidexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_failures_are_classified() {
        let status = ZellidexError::HttpStatus {
            url: "https://example.test".to_string(),
            status: 500,
        };
        let decode: ZellidexError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        let theme = ZellidexError::Theme("bad".to_string());

        assert!(status.is_fetch_failure());
        assert!(decode.is_fetch_failure());
        assert!(!theme.is_fetch_failure());
    }
}
