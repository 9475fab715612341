//! Error types for the nereus-geo crate.

/// Error type for all fallible operations in the nereus-geo crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GeoError {
    /// Returned when the coordinate slices do not match the stated grid shape.
    #[error("grid shape mismatch: {ny}x{nx} grid needs {} cells, got {len}", ny * nx)]
    GridShapeMismatch {
        /// Number of grid rows.
        ny: usize,
        /// Number of grid columns.
        nx: usize,
        /// Length of the offending coordinate slice.
        len: usize,
    },

    /// Returned when the validity mask length does not match the grid size.
    #[error("mask length {mask} does not match grid size {cells}")]
    MaskLengthMismatch {
        /// Length of the mask slice.
        mask: usize,
        /// Number of grid cells.
        cells: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_grid_shape_mismatch() {
        let e = GeoError::GridShapeMismatch {
            ny: 2,
            nx: 3,
            len: 5,
        };
        assert_eq!(e.to_string(), "grid shape mismatch: 2x3 grid needs 6 cells, got 5");
    }

    #[test]
    fn error_mask_length_mismatch() {
        let e = GeoError::MaskLengthMismatch { mask: 4, cells: 6 };
        assert_eq!(e.to_string(), "mask length 4 does not match grid size 6");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<GeoError>();
    }
}
