//! Region membership testing for observation filtering.
//!
//! A [`Region`] is configuration data: constructed once from the region
//! table, never mutated afterwards. Four kinds are supported — inclusive
//! bounding boxes, polar caps, polygon rings, and projected model-grid
//! footprints (a coarse axis-aligned envelope in projected coordinates,
//! intended for pre-filtering only).

pub mod error;
pub mod projection;
pub mod region;

pub use error::RegionError;
pub use projection::Projection;
pub use region::{Region, RegionMatches};
