//! Configuration Error Types

use derive_more::{Display, Error};

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// An explicitly requested configuration file does not exist.
    #[display("configuration file not found: {_0}")]
    Missing(#[error(not(source))] String),
    /// The file extension does not name a supported format.
    #[display("unsupported configuration format: {_0}")]
    UnsupportedFormat(#[error(not(source))] String),
    /// Merging defaults, file and environment failed (syntax or type errors).
    #[display("unable to load configuration")]
    Load,
    /// A value was read successfully but makes no sense.
    #[display("invalid configuration value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ErrorKind {
    /// Configuration errors need the user to fix something; retrying never helps.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
