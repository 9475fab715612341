//! Conversions between absolute datetimes and numeric epoch offsets.
//!
//! Persisted files store time as seconds since a per-product basetime
//! (e.g. 2000-01-01 for the altimeter swaths, 1970-01-01 for the wave
//! models). Offsets are converted with millisecond resolution, which is
//! plenty for the 1 Hz altimeter sampling.

use chrono::{NaiveDateTime, TimeDelta, Timelike};

/// Converts numeric offsets in seconds since `basetime` into datetimes.
pub fn epoch_offsets_to_datetimes(basetime: NaiveDateTime, secs: &[f64]) -> Vec<NaiveDateTime> {
    secs.iter()
        .map(|&s| basetime + TimeDelta::milliseconds((s * 1000.0).round() as i64))
        .collect()
}

/// Converts datetimes into numeric offsets in seconds since `basetime`.
pub fn datetimes_to_epoch_offsets(basetime: NaiveDateTime, times: &[NaiveDateTime]) -> Vec<f64> {
    times
        .iter()
        .map(|&t| (t - basetime).num_milliseconds() as f64 / 1000.0)
        .collect()
}

/// Rounds a datetime to the nearest full hour (minute >= 30 rounds up).
pub fn hour_rounder(t: NaiveDateTime) -> NaiveDateTime {
    let truncated = t
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .expect("zeroing sub-hour fields cannot fail");
    truncated + TimeDelta::hours((t.minute() / 30) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn offsets_to_datetimes_basic() {
        let base = dt(2000, 1, 1, 0, 0, 0);
        let out = epoch_offsets_to_datetimes(base, &[0.0, 60.0, 86400.0]);
        assert_eq!(out[0], base);
        assert_eq!(out[1], dt(2000, 1, 1, 0, 1, 0));
        assert_eq!(out[2], dt(2000, 1, 2, 0, 0, 0));
    }

    #[test]
    fn offsets_fractional_seconds() {
        let base = dt(2000, 1, 1, 0, 0, 0);
        let out = epoch_offsets_to_datetimes(base, &[0.5]);
        assert_eq!(out[0], base + TimeDelta::milliseconds(500));
    }

    #[test]
    fn round_trip_preserves_offsets() {
        let base = dt(1970, 1, 1, 0, 0, 0);
        let secs = vec![0.0, 1.25, 3600.0, 1_500_000_000.0];
        let times = epoch_offsets_to_datetimes(base, &secs);
        let back = datetimes_to_epoch_offsets(base, &times);
        assert_eq!(back, secs);
    }

    #[test]
    fn hour_rounder_rounds_down() {
        assert_eq!(hour_rounder(dt(2019, 10, 1, 17, 29, 59)), dt(2019, 10, 1, 17, 0, 0));
    }

    #[test]
    fn hour_rounder_rounds_up() {
        assert_eq!(hour_rounder(dt(2019, 10, 1, 17, 30, 0)), dt(2019, 10, 1, 18, 0, 0));
    }

    #[test]
    fn hour_rounder_crosses_midnight() {
        assert_eq!(hour_rounder(dt(2019, 10, 1, 23, 45, 0)), dt(2019, 10, 2, 0, 0, 0));
    }

    #[test]
    fn hour_rounder_on_the_hour_unchanged() {
        assert_eq!(hour_rounder(dt(2019, 10, 1, 12, 0, 0)), dt(2019, 10, 1, 12, 0, 0));
    }
}
