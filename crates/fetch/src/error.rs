//! Error types for nereus-fetch.

/// Error type for swath acquisition.
///
/// `RetryExhausted` is the terminal failure of the batch fetch: one
/// member ran out of attempts. It aborts the whole run so a transient
/// provider outage is visible instead of silently thinning the archive.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Wraps a filesystem or transfer error for a single attempt.
    #[error("io error: {reason}")]
    Io {
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when a named file is not present at the source.
    #[error("file '{name}' not found at source")]
    NotFound {
        /// Name of the missing file.
        name: String,
    },

    /// Returned when a filename does not carry a parseable date stamp.
    #[error("file '{name}' has no parseable date stamp")]
    BadStamp {
        /// The offending filename.
        name: String,
    },

    /// Returned when every attempt for one file failed.
    #[error("giving up on '{name}' after {attempts} attempts")]
    RetryExhausted {
        /// Name of the file that could not be fetched.
        name: String,
        /// Number of attempts made.
        attempts: u32,
    },

    /// Wraps a thread-pool construction failure.
    #[error("worker pool error: {reason}")]
    Pool {
        /// Description of the pool build failure.
        reason: String,
    },
}

impl From<std::io::Error> for FetchError {
    fn from(e: std::io::Error) -> Self {
        FetchError::Io {
            reason: e.to_string(),
        }
    }
}
