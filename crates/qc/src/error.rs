//! Error types for the nereus-qc crate.

/// Error type for all fallible operations in the nereus-qc crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum QcError {
    /// Returned when a smoothing window length is unusable for the
    /// requested alignment (zero, longer than the series, or even with
    /// centered alignment).
    #[error("invalid window length {window}: {reason}")]
    InvalidWindow {
        /// The offending window length.
        window: usize,
        /// Why the window is unusable.
        reason: String,
    },
}
