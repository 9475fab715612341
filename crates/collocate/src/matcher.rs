//! Nearest-cell matching of filtered observations against a model field.

use chrono::NaiveDateTime;
use nereus_geo::nearest_cells;
use nereus_io::ModelField;
use nereus_temporal::match_window;
use tracing::debug;

use crate::error::CollocateError;
use crate::filter::ObsSubset;

/// Matching tolerances.
///
/// Defaults mirror the operational setup: a 6 km separation limit on a
/// nominally 4 km grid, and a 30 minute window around the field's valid
/// time.
#[derive(Debug, Clone, PartialEq)]
pub struct CollocationConfig {
    /// Maximum observation-to-cell separation in km.
    pub distance_limit_km: f64,
    /// Half-width of the valid-time tolerance window in minutes.
    pub time_window_minutes: i64,
}

impl Default for CollocationConfig {
    fn default() -> Self {
        Self {
            distance_limit_km: 6.0,
            time_window_minutes: 30,
        }
    }
}

impl CollocationConfig {
    /// Sets the separation limit in km.
    pub fn with_distance_limit_km(mut self, limit: f64) -> Self {
        self.distance_limit_km = limit;
        self
    }

    /// Sets the time tolerance in minutes.
    pub fn with_time_window_minutes(mut self, minutes: i64) -> Self {
        self.time_window_minutes = minutes;
        self
    }
}

/// One resolved observation/model pair.
///
/// A record exists only when both sides resolved: the observation found
/// an unmasked cell within the distance limit and its timestamp fell in
/// the valid-time window. `distance_km` is always non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    /// Observation instant.
    pub time: NaiveDateTime,
    /// Model Hs at the matched cell.
    pub model_hs: f64,
    /// Latitude of the matched cell.
    pub model_lat: f64,
    /// Longitude of the matched cell.
    pub model_lon: f64,
    /// Observed Hs.
    pub obs_hs: f64,
    /// Observation latitude.
    pub obs_lat: f64,
    /// Observation longitude.
    pub obs_lon: f64,
    /// Great-circle separation in km.
    pub distance_km: f64,
}

/// Matches each observation to its nearest valid model cell.
///
/// Observations are processed in series order. Cells with a NaN value
/// are masked out of the search; an observation is skipped when the
/// nearest valid cell lies beyond the distance limit or its timestamp
/// misses the valid-time window. Distance ties resolve to the first
/// cell in row-major scan order. The function is pure: identical inputs
/// produce identical output, and empty input produces empty output.
pub fn collocate(
    field: &ModelField,
    obs: &ObsSubset,
    config: &CollocationConfig,
) -> Result<Vec<MatchRecord>, CollocateError> {
    let mask: Vec<bool> = field.values.iter().map(|v| !v.is_nan()).collect();
    let mut records = Vec::new();

    for i in 0..obs.len() {
        let in_window = match_window(
            field.valid_time,
            None,
            config.time_window_minutes,
            &obs.times[i..i + 1],
        );
        if in_window.is_empty() {
            continue;
        }

        let nearest = nearest_cells(
            &field.lats,
            &field.lons,
            field.ny,
            field.nx,
            obs.lats[i],
            obs.lons[i],
            Some(&mask),
            Some(config.distance_limit_km),
        )?;
        let Some(&(row, col)) = nearest.cells.first() else {
            continue;
        };
        let cell = row * field.nx + col;

        records.push(MatchRecord {
            time: obs.times[i],
            model_hs: field.values[cell],
            model_lat: field.lats[cell],
            model_lon: field.lons[cell],
            obs_hs: obs.hs[i],
            obs_lat: obs.lats[i],
            obs_lon: obs.lons[i],
            distance_km: nearest.distance_km,
        });
    }

    if records.is_empty() {
        debug!(valid_time = %field.valid_time, "no collocated values");
    } else {
        debug!(
            valid_time = %field.valid_time,
            matches = records.len(),
            observations = obs.len(),
            "collocation complete"
        );
    }
    Ok(records)
}
