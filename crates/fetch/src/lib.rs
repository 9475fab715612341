//! # nereus-fetch
//!
//! Acquisition of altimeter swath files: a [`SwathSource`] abstraction
//! over the transfer protocol, per-file retries with typed exhaustion,
//! window-based filename selection, and a bounded worker pool writing
//! into the year/month partition tree.

mod batch;
mod error;
mod select;
mod source;

pub use batch::{fetch_batch, retry, FetchConfig};
pub use error::FetchError;
pub use select::select_by_window;
pub use source::{coverage_start, LocalMirror, SwathSource};
