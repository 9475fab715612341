//! Quality control for observation time series.
//!
//! Applied to altimeter Hs series before collocation: [`detect_outliers`]
//! flags spikes and physically impossible values, [`running_mean`] produces
//! the smoothed series stored alongside the raw one, and [`detect_blocks`]
//! segments a series into contiguous runs separated by sampling gaps.

pub mod blocks;
pub mod error;
pub mod outliers;
pub mod smooth;

pub use blocks::detect_blocks;
pub use error::QcError;
pub use outliers::{OutlierConfig, detect_outliers};
pub use smooth::{Alignment, running_mean};
