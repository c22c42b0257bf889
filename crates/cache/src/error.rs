//! Cache Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! Refresh rounds never surface these to callers: a failing source is
//! logged and its previous records are kept. They exist so that the log
//! line carries the full error tree (which source, and why).

use derive_more::{Display, Error};
use jotunn_extract::models::RecordKind;

/// A cache error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for cache operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Fetching the page for a record kind failed this round.
    #[display("unable to fetch {_0} list")]
    Fetch(#[error(not(source))] RecordKind),
    /// A source URL could not be parsed.
    #[display("invalid source URL: {_0}")]
    InvalidSource(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }
}
