//! Geospatial primitives: great-circle distance and nearest-cell search.
//!
//! Grids are flat row-major slices of per-cell latitudes and longitudes with
//! explicit `ny` x `nx` shape, the layout the model reader produces. The
//! search scans every unmasked cell, so it stays exact for the curvilinear
//! grids the wave models use (no spatial index assumptions).

pub mod error;
pub mod haversine;
pub mod nearest;

pub use error::GeoError;
pub use haversine::haversine;
pub use nearest::{NearestMatch, nearest_cells};
