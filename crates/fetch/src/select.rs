//! Filename selection by time window.

use std::collections::HashSet;

use chrono::{NaiveDateTime, TimeDelta};

/// Keeps filenames whose coverage-start stamp falls in the widened period.
///
/// Builds the set of `_%Y%m%dT%H` stamps obtained by stepping from
/// `start - w` to `end + w` in `w`-minute increments (a zero window
/// steps hourly) and keeps every name containing one of them. This
/// mirrors the provider listing convention where files are cut on the
/// window cadence.
pub fn select_by_window(
    names: &[String],
    start: NaiveDateTime,
    end: NaiveDateTime,
    window_minutes: i64,
) -> Vec<String> {
    let step = TimeDelta::minutes(window_minutes.max(1).min(60));
    let lo = start - TimeDelta::minutes(window_minutes);
    let hi = end + TimeDelta::minutes(window_minutes);

    let mut stamps: HashSet<String> = HashSet::new();
    let mut t = lo;
    while t <= hi {
        stamps.insert(format!("_{}", t.format("%Y%m%dT%H")));
        t += step;
    }

    names
        .iter()
        .filter(|name| stamps.iter().any(|s| name.contains(s.as_str())))
        .cloned()
        .collect()
}
