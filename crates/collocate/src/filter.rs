//! Observation pre-filtering by time window and region.

use chrono::NaiveDateTime;
use nereus_io::SwathSeries;
use nereus_region::Region;
use nereus_temporal::match_window;
use tracing::debug;

/// Observations surviving the time and region filters.
///
/// Parallel columns; `indices` point back into the source swath series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObsSubset {
    /// Sample instants.
    pub times: Vec<NaiveDateTime>,
    /// Significant wave height in meters.
    pub hs: Vec<f64>,
    /// Latitudes in degrees north.
    pub lats: Vec<f64>,
    /// Longitudes in degrees east.
    pub lons: Vec<f64>,
    /// Indices of the surviving samples in the source series.
    pub indices: Vec<usize>,
}

impl ObsSubset {
    /// Number of surviving observations.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether nothing survived the filters.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Selects the swath samples inside the time window and the region.
///
/// The time filter runs first (`[target - w, target + w)` for a single
/// instant, `[target - w, end + w)` when `end` is given), then the
/// region membership test. Input order is preserved and an empty result
/// is normal operation.
pub fn filter_observations(
    swath: &SwathSeries,
    region: &Region,
    target: NaiveDateTime,
    end: Option<NaiveDateTime>,
    window_minutes: i64,
) -> ObsSubset {
    let in_window = match_window(target, end, window_minutes, &swath.times);

    let mut subset = ObsSubset::default();
    for &i in &in_window.indices {
        if region.contains(swath.lats[i], swath.lons[i]) {
            subset.times.push(swath.times[i]);
            subset.hs.push(swath.hs[i]);
            subset.lats.push(swath.lats[i]);
            subset.lons.push(swath.lons[i]);
            subset.indices.push(i);
        }
    }
    debug!(
        total = swath.len(),
        in_window = in_window.len(),
        in_region = subset.len(),
        "observations filtered"
    );
    subset
}
