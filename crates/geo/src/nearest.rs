//! Nearest grid cell search over a 2-D coordinate grid.

use crate::error::GeoError;
use crate::haversine::haversine;

/// Result of a nearest-cell search.
///
/// `cells` holds `(row, col)` indices of every cell achieving the minimum
/// distance, in row-major scan order. It is empty when all cells are masked
/// out or the minimum exceeds the distance limit; callers treat that as
/// "no match", not as an error.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestMatch {
    /// Tied nearest cells in row-major scan order.
    pub cells: Vec<(usize, usize)>,
    /// Distance in km to the nearest cell(s); NaN when `cells` is empty.
    pub distance_km: f64,
}

impl NearestMatch {
    fn empty() -> Self {
        Self {
            cells: Vec::new(),
            distance_km: f64::NAN,
        }
    }

    /// Returns true when no cell satisfied the search constraints.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Finds the grid cell(s) nearest to `(target_lat, target_lon)`.
///
/// `lats` and `lons` are flat row-major `ny` x `nx` slices of per-cell
/// coordinates. An optional `mask` excludes cells (`false` = skip); an
/// optional `max_distance_km` turns far-away minima into an empty result.
/// Exact distance ties are all reported, in row-major scan order.
pub fn nearest_cells(
    lats: &[f64],
    lons: &[f64],
    ny: usize,
    nx: usize,
    target_lat: f64,
    target_lon: f64,
    mask: Option<&[bool]>,
    max_distance_km: Option<f64>,
) -> Result<NearestMatch, GeoError> {
    let cells = ny * nx;
    if lats.len() != cells {
        return Err(GeoError::GridShapeMismatch {
            ny,
            nx,
            len: lats.len(),
        });
    }
    if lons.len() != cells {
        return Err(GeoError::GridShapeMismatch {
            ny,
            nx,
            len: lons.len(),
        });
    }
    if let Some(m) = mask {
        if m.len() != cells {
            return Err(GeoError::MaskLengthMismatch {
                mask: m.len(),
                cells,
            });
        }
    }

    let mut min_dist = f64::INFINITY;
    let mut tied: Vec<usize> = Vec::new();
    for i in 0..cells {
        if let Some(m) = mask {
            if !m[i] {
                continue;
            }
        }
        let d = haversine(lons[i], lats[i], target_lon, target_lat);
        if d < min_dist {
            min_dist = d;
            tied.clear();
            tied.push(i);
        } else if d == min_dist {
            tied.push(i);
        }
    }

    if tied.is_empty() {
        return Ok(NearestMatch::empty());
    }
    if let Some(limit) = max_distance_km {
        if min_dist > limit {
            return Ok(NearestMatch::empty());
        }
    }

    Ok(NearestMatch {
        cells: tied.into_iter().map(|i| (i / nx, i % nx)).collect(),
        distance_km: min_dist,
    })
}
