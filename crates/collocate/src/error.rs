//! Error types for nereus-collocate.

/// Error type for the collocation crate.
///
/// The only failure mode is a malformed model grid reaching the matcher;
/// empty results are not errors.
#[derive(Debug, thiserror::Error)]
pub enum CollocateError {
    /// Wraps a grid-geometry error from the nearest-cell search.
    #[error("geometry error: {reason}")]
    Geometry {
        /// Description of the underlying geometry failure.
        reason: String,
    },
}

impl From<nereus_geo::GeoError> for CollocateError {
    fn from(e: nereus_geo::GeoError) -> Self {
        CollocateError::Geometry {
            reason: e.to_string(),
        }
    }
}
