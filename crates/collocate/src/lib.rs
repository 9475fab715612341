//! # nereus-collocate
//!
//! Spatiotemporal matching of altimeter observations against wave-model
//! fields: filter a swath down to the step's time window and region,
//! then pair each surviving observation with its nearest valid grid
//! cell under distance and time tolerances.

mod error;
mod filter;
mod matcher;

pub use error::CollocateError;
pub use filter::{filter_observations, ObsSubset};
pub use matcher::{collocate, CollocationConfig, MatchRecord};
