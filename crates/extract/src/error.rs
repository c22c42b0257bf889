//! Extraction Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! Row-level problems (short rows, missing images, unparsable amounts) are
//! never errors: they are data-quality guards handled inline by the
//! extractors. Only problems with the document as a whole end up here.

use derive_more::{Display, Error};

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The base URL a document was fetched from could not be parsed, so
    /// relative links inside it cannot be resolved.
    #[display("invalid document base URL: {_0}")]
    InvalidBaseUrl(#[error(not(source))] String),
    /// The name of a record kind was not recognised.
    #[display("unknown record kind: {_0}")]
    UnknownKind(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // The input is either valid or it's not; retrying changes nothing.
        false
    }
}
