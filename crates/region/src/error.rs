//! Error types for the nereus-region crate.

/// Error type for all fallible operations in the nereus-region crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RegionError {
    /// Returned when a polygon ring has fewer than three vertices.
    #[error("polygon needs at least 3 vertices, got {vertices}")]
    DegeneratePolygon {
        /// Number of vertices supplied.
        vertices: usize,
    },

    /// Returned when a grid footprint is built from an empty reference grid.
    #[error("grid footprint needs a non-empty reference grid")]
    EmptyReferenceGrid,

    /// Returned when the reference grid coordinate slices differ in length.
    #[error("reference grid lats ({lats}) and lons ({lons}) differ in length")]
    GridLengthMismatch {
        /// Length of the latitude slice.
        lats: usize,
        /// Length of the longitude slice.
        lons: usize,
    },
}
