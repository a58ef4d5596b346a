//! Error types for gitseed-git.

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during git operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A `git` subprocess exited non-zero.
    #[error("git {command} failed: {stderr}")]
    CommandFailed {
        /// The git subcommand that failed.
        command: String,
        /// Trimmed stderr from the subprocess.
        stderr: String,
    },

    /// A non-forced push was rejected because the remote has diverging
    /// history. Kept separate so the caller can print recovery guidance.
    #[error("push rejected: {stderr}")]
    PushRejected {
        /// Trimmed stderr from `git push`.
        stderr: String,
    },

    /// IO error spawning or talking to a subprocess.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Underlying git2 error.
    #[error("git error: {0}")]
    Git2(#[from] git2::Error),
}
