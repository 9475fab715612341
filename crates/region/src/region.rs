//! The `Region` tagged variant and membership filtering.

use geo::{Contains, Coord, LineString, Point, Polygon};
use tracing::debug;

use crate::error::RegionError;
use crate::projection::Projection;

/// Geographic region used to pre-filter observations.
///
/// Constructed once from configuration and never mutated. Membership
/// semantics per variant:
///
/// - `BBox`: inclusive at all four bounds.
/// - `PolarCap`: `lat >= bounding_lat`.
/// - `Polygon`: point-in-polygon test against the supplied ring; the ring
///   must be simple (non-self-intersecting) and vertex order matters.
/// - `GridFootprint`: the query point's projection must fall strictly
///   inside the axis-aligned bounding box of the projected reference grid.
///   This is an envelope of the true footprint, suitable for coarse
///   pre-filtering only.
#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    /// Inclusive lat-lon bounding box.
    BBox {
        /// Southern bound in degrees.
        lat_lo: f64,
        /// Northern bound in degrees.
        lat_hi: f64,
        /// Western bound in degrees.
        lon_lo: f64,
        /// Eastern bound in degrees.
        lon_hi: f64,
    },
    /// Everything poleward of a bounding latitude.
    PolarCap {
        /// Minimum latitude in degrees.
        bounding_lat: f64,
    },
    /// Simple polygon ring in (lon, lat) degrees.
    Polygon(Polygon<f64>),
    /// Axis-aligned envelope of a projected model grid.
    GridFootprint {
        /// Projection the envelope was computed in.
        projection: Projection,
        /// Minimum projected x.
        x_min: f64,
        /// Maximum projected x.
        x_max: f64,
        /// Minimum projected y.
        y_min: f64,
        /// Maximum projected y.
        y_max: f64,
    },
}

/// Points accepted by a region filter, with their indices into the input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegionMatches {
    /// Latitudes of accepted points.
    pub lats: Vec<f64>,
    /// Longitudes of accepted points.
    pub lons: Vec<f64>,
    /// Indices of accepted points in the original input.
    pub indices: Vec<usize>,
}

impl RegionMatches {
    /// Returns true when no point fell inside the region.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of accepted points.
    pub fn len(&self) -> usize {
        self.indices.len()
    }
}

impl Region {
    /// Builds a polygon region from an ordered (lon, lat) vertex ring.
    ///
    /// The caller must supply a simple, non-self-intersecting ring; the
    /// ring is closed automatically if the last vertex differs from the
    /// first.
    pub fn polygon(vertices: &[(f64, f64)]) -> Result<Self, RegionError> {
        if vertices.len() < 3 {
            return Err(RegionError::DegeneratePolygon {
                vertices: vertices.len(),
            });
        }
        let coords: Vec<Coord<f64>> = vertices.iter().map(|&(x, y)| Coord { x, y }).collect();
        let exterior = LineString::from(coords);
        Ok(Region::Polygon(Polygon::new(exterior, vec![])))
    }

    /// Builds a grid-footprint region from a model reference grid.
    ///
    /// Projects every grid coordinate through `projection` and caches the
    /// axis-aligned bounding box of the result; queries only project the
    /// single query point.
    pub fn grid_footprint(
        projection: Projection,
        grid_lats: &[f64],
        grid_lons: &[f64],
    ) -> Result<Self, RegionError> {
        if grid_lats.len() != grid_lons.len() {
            return Err(RegionError::GridLengthMismatch {
                lats: grid_lats.len(),
                lons: grid_lons.len(),
            });
        }
        if grid_lats.is_empty() {
            return Err(RegionError::EmptyReferenceGrid);
        }

        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for (&lat, &lon) in grid_lats.iter().zip(grid_lons.iter()) {
            let (x, y) = projection.forward(lon, lat);
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }

        Ok(Region::GridFootprint {
            projection,
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    /// Tests whether a (lat, lon) point in degrees belongs to the region.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        match *self {
            Region::BBox {
                lat_lo,
                lat_hi,
                lon_lo,
                lon_hi,
            } => lat >= lat_lo && lat <= lat_hi && lon >= lon_lo && lon <= lon_hi,
            Region::PolarCap { bounding_lat } => lat >= bounding_lat,
            Region::Polygon(ref poly) => poly.contains(&Point::new(lon, lat)),
            Region::GridFootprint {
                ref projection,
                x_min,
                x_max,
                y_min,
                y_max,
            } => {
                let (x, y) = projection.forward(lon, lat);
                x > x_min && x < x_max && y > y_min && y < y_max
            }
        }
    }

    /// Filters parallel lat/lon slices, keeping points inside the region.
    ///
    /// Returns the accepted coordinates and their indices into the input,
    /// preserving input order. An empty result is non-fatal and only logged.
    ///
    /// # Panics
    ///
    /// Panics if `lats` and `lons` differ in length.
    pub fn filter(&self, lats: &[f64], lons: &[f64]) -> RegionMatches {
        assert_eq!(lats.len(), lons.len(), "region filter: coordinate length mismatch");
        let mut matches = RegionMatches::default();
        for i in 0..lats.len() {
            if self.contains(lats[i], lons[i]) {
                matches.lats.push(lats[i]);
                matches.lons.push(lons[i]);
                matches.indices.push(i);
            }
        }
        if matches.is_empty() {
            debug!("no values in region");
        } else {
            debug!(accepted = matches.len(), total = lats.len(), "region filter applied");
        }
        matches
    }
}
