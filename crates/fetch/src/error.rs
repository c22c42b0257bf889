//! Fetch Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A fetch error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for fetch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The HTTP client could not be constructed (TLS backend, bad user agent).
    #[display("unable to build HTTP client")]
    Client,
    /// The URL is not an absolute http(s) URL.
    #[display("invalid URL: {_0}")]
    InvalidUrl(#[error(not(source))] String),
    /// The request did not complete within the configured timeout.
    #[display("request timed out")]
    Timeout,
    /// DNS, connection or other transport-level failure.
    #[display("network error: {_0}")]
    Network(#[error(not(source))] String),
    /// The origin answered with a non-success status.
    #[display("unexpected HTTP status {_0}")]
    Status(#[error(not(source))] u16),
    /// The response body could not be read or decoded.
    #[display("unable to read response body")]
    Body,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout | Self::Network(_) | Self::Body => true,
            Self::Status(status) => *status == 429 || *status >= 500,
            Self::Client | Self::InvalidUrl(_) => false,
        }
    }
}
