//! Tolerance-window selection of timestamped samples.

use chrono::{NaiveDateTime, TimeDelta};

use crate::epoch::epoch_offsets_to_datetimes;

/// Samples accepted by a window match: the absolute timestamps and their
/// indices into the input sequence, in input order (no reordering, no
/// deduplication).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WindowMatches {
    /// Accepted timestamps.
    pub times: Vec<NaiveDateTime>,
    /// Indices of the accepted samples in the original input.
    pub indices: Vec<usize>,
}

impl WindowMatches {
    /// Returns true when no sample fell inside the window.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of accepted samples.
    pub fn len(&self) -> usize {
        self.indices.len()
    }
}

/// Selects samples whose timestamps fall inside a tolerance window.
///
/// Single-instant mode (`end` absent or equal to `target`) accepts
/// `t in [target - w, target + w)`; interval mode (`end` present and
/// different) accepts `t in [target - w, end + w)`. The lower bound is
/// inclusive and the upper bound exclusive in both modes, except that a
/// zero-width window still accepts the exact instant: with `w = 0` the
/// single-instant window degenerates to equality with `target`. The
/// persisted collocation files already encode this asymmetry, so it is
/// kept as the current contract.
pub fn match_window(
    target: NaiveDateTime,
    end: Option<NaiveDateTime>,
    window_minutes: i64,
    times: &[NaiveDateTime],
) -> WindowMatches {
    let w = TimeDelta::minutes(window_minutes);
    let lo = target - w;
    let hi = match end {
        Some(e) if e != target => e + w,
        _ => target + w,
    };

    let mut matches = WindowMatches::default();
    for (i, &t) in times.iter().enumerate() {
        // A zero-width window collapses [lo, hi) to the empty set; keep
        // the exact instant instead.
        let hit = if lo == hi {
            t == lo
        } else {
            t >= lo && t < hi
        };
        if hit {
            matches.times.push(t);
            matches.indices.push(i);
        }
    }
    matches
}

/// [`match_window`] over numeric offsets in seconds since `basetime`.
pub fn match_window_offsets(
    basetime: NaiveDateTime,
    target: NaiveDateTime,
    end: Option<NaiveDateTime>,
    window_minutes: i64,
    offsets: &[f64],
) -> WindowMatches {
    let times = epoch_offsets_to_datetimes(basetime, offsets);
    match_window(target, end, window_minutes, &times)
}
