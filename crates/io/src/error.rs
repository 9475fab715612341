//! Error types for nereus-io.

use std::path::PathBuf;

use chrono::NaiveDateTime;

/// Error type for all fallible operations in the nereus-io crate.
///
/// Covers filesystem and NetCDF failures, time-axis parsing issues, and
/// the two data-availability conditions the batch loop cares about:
/// a missing valid time in a model file (recoverable per step) and a
/// lead time the model cycle cannot serve (fatal).
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps a filesystem error.
    #[error("io error: {reason}")]
    Io {
        /// Description of the underlying filesystem failure.
        reason: String,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },

    /// Returned when a required variable is not present in a file.
    #[error("variable '{name}' not found in {}", path.display())]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a dimension or axis has an unexpected size.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the dimension.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },

    /// Returned when a time value or units string cannot be parsed.
    #[error("invalid time: {reason}")]
    InvalidTime {
        /// Description of the time parsing issue.
        reason: String,
    },

    /// Returned when a model file holds no field for the requested valid
    /// time. Batch loops log this and move to the next step.
    #[error("no model data for time step {valid_time}")]
    NoDataForTimeStep {
        /// The valid time that was requested.
        valid_time: NaiveDateTime,
    },

    /// Returned when a requested lead time cannot be served by the model
    /// cycle. This aborts the run.
    #[error("lead time {lead_hours} h unavailable for model '{model}': {reason}")]
    LeadTimeUnavailable {
        /// Model identifier from the configuration.
        model: String,
        /// The offending lead time in hours.
        lead_hours: u32,
        /// Why the cadence check rejected it.
        reason: String,
    },

    /// Wraps an error from the quality-control smoother.
    #[error("qc error: {reason}")]
    Qc {
        /// Description of the underlying smoothing failure.
        reason: String,
    },
}

impl From<netcdf::Error> for IoError {
    fn from(e: netcdf::Error) -> Self {
        IoError::Netcdf {
            reason: e.to_string(),
        }
    }
}

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Io {
            reason: e.to_string(),
        }
    }
}

impl From<nereus_qc::QcError> for IoError {
    fn from(e: nereus_qc::QcError) -> Self {
        IoError::Qc {
            reason: e.to_string(),
        }
    }
}
