//! Error types for gitseed-core.

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while validating generation inputs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configuration parameter is out of range.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfiguration {
        /// Name of the offending parameter.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A commit identity field is empty.
    #[error("commit identity {0} must not be empty")]
    EmptyIdentity(&'static str),
}
