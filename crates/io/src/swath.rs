//! Altimeter swath reading and assembly.
//!
//! Provider files carry one satellite pass each: `time` in seconds since
//! 2000-01-01, `latitude`/`longitude`, and the `VAVH` significant wave
//! height. Assembly concatenates the requested files, normalizes
//! longitudes to [-180, 180), sorts and dedupes by timestamp, smooths,
//! and drops samples without a valid Hs.

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};
use nereus_qc::{running_mean, Alignment};
use nereus_temporal::epoch_offsets_to_datetimes;
use tracing::debug;

use crate::error::IoError;
use crate::filenames::{parse_swath_stamp, swath_dir};
use crate::netcdf_read::{open_file, read_1d_f64};

/// Hs variable name in the provider's L3 altimetry files.
const HS_VAR: &str = "VAVH";

/// Window length of the along-track smoother.
const SMOOTH_WINDOW: usize = 5;

/// Epoch base of the altimeter time axis.
pub fn satellite_basetime() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// An assembled sequence of altimeter samples in time order.
///
/// Parallel columns of equal length; `hs_smooth` is the centered
/// running mean of `hs` (window 5) computed over the full series before
/// invalid samples were dropped, so it can be NaN near series edges.
/// Immutable after assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct SwathSeries {
    /// Sample instants, non-decreasing and unique.
    pub times: Vec<NaiveDateTime>,
    /// Significant wave height in meters.
    pub hs: Vec<f64>,
    /// Latitudes in degrees north.
    pub lats: Vec<f64>,
    /// Longitudes in degrees east, normalized to [-180, 180).
    pub lons: Vec<f64>,
    /// Along-track smoothed Hs.
    pub hs_smooth: Vec<f64>,
}

impl SwathSeries {
    /// Number of samples in the series.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the series holds no samples.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// Maps a longitude in degrees onto [-180, 180).
fn normalize_longitude(lon: f64) -> f64 {
    (lon - 180.0).rem_euclid(360.0) - 180.0
}

/// Reads and assembles a [`SwathSeries`] from the given provider files.
///
/// Samples from all files are concatenated, sorted by timestamp (ties
/// keep the first occurrence in file order and duplicates are dropped),
/// smoothed, and finally filtered down to samples with a finite Hs. An
/// empty `paths` slice yields an empty series.
pub fn read_swath_files(paths: &[PathBuf]) -> Result<SwathSeries, IoError> {
    let mut offsets: Vec<f64> = Vec::new();
    let mut hs: Vec<f64> = Vec::new();
    let mut lats: Vec<f64> = Vec::new();
    let mut lons: Vec<f64> = Vec::new();

    for path in paths {
        let file = open_file(path)?;
        let t = read_1d_f64(&file, &["time"], path)?;
        let h = read_1d_f64(&file, &[HS_VAR], path)?;
        let la = read_1d_f64(&file, &["latitude", "lat"], path)?;
        let lo = read_1d_f64(&file, &["longitude", "lon"], path)?;
        if h.len() != t.len() || la.len() != t.len() || lo.len() != t.len() {
            return Err(IoError::DimensionMismatch {
                name: "time".to_string(),
                expected: t.len(),
                got: h.len().min(la.len()).min(lo.len()),
            });
        }
        offsets.extend_from_slice(&t);
        hs.extend_from_slice(&h);
        lats.extend_from_slice(&la);
        lons.extend(lo.iter().map(|&l| normalize_longitude(l)));
        debug!(path = %path.display(), samples = t.len(), "swath file read");
    }

    // Stable sort by timestamp so the first occurrence of a duplicate
    // instant (in file order) survives the dedup below.
    let mut order: Vec<usize> = (0..offsets.len()).collect();
    order.sort_by(|&a, &b| offsets[a].total_cmp(&offsets[b]));

    let mut kept: Vec<usize> = Vec::with_capacity(order.len());
    for &i in &order {
        if kept.last().map_or(true, |&j| offsets[j] != offsets[i]) {
            kept.push(i);
        }
    }

    let offsets: Vec<f64> = kept.iter().map(|&i| offsets[i]).collect();
    let hs: Vec<f64> = kept.iter().map(|&i| hs[i]).collect();
    let lats: Vec<f64> = kept.iter().map(|&i| lats[i]).collect();
    let lons: Vec<f64> = kept.iter().map(|&i| lons[i]).collect();

    let hs_smooth = if hs.len() >= SMOOTH_WINDOW {
        running_mean(&hs, SMOOTH_WINDOW, Alignment::Centered)?.0
    } else {
        vec![f64::NAN; hs.len()]
    };

    let times = epoch_offsets_to_datetimes(satellite_basetime(), &offsets);

    // Samples without a valid Hs carry no information for collocation.
    let valid: Vec<usize> = (0..hs.len()).filter(|&i| !hs[i].is_nan()).collect();
    let series = SwathSeries {
        times: valid.iter().map(|&i| times[i]).collect(),
        hs: valid.iter().map(|&i| hs[i]).collect(),
        lats: valid.iter().map(|&i| lats[i]).collect(),
        lons: valid.iter().map(|&i| lons[i]).collect(),
        hs_smooth: valid.iter().map(|&i| hs_smooth[i]).collect(),
    };
    debug!(samples = series.len(), files = paths.len(), "swath series assembled");
    Ok(series)
}

/// Lists local swath files whose coverage overlaps `[start - w, end + w]`.
///
/// Walks the `<root>/<sat>/<YYYY>/<MM>/` partitions touching the widened
/// interval and filters by the filename stamp triple; files without a
/// parseable stamp are skipped. Results are sorted by name. A missing
/// partition directory is not an error, it just contributes no files.
pub fn list_swath_files(
    root: &Path,
    sat: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
    window_minutes: i64,
) -> Result<Vec<PathBuf>, IoError> {
    let lo = start - TimeDelta::minutes(window_minutes);
    let hi = end + TimeDelta::minutes(window_minutes);

    let mut found: Vec<PathBuf> = Vec::new();
    for month in months_covering(lo, hi) {
        let dir = swath_dir(root, sat, month);
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "swath partition absent");
            continue;
        }
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some((from, to)) = parse_swath_stamp(name) {
                if from <= hi && to >= lo {
                    found.push(entry.path());
                }
            }
        }
    }
    found.sort();
    Ok(found)
}

/// First-of-month instants for every month intersecting `[lo, hi]`.
fn months_covering(lo: NaiveDateTime, hi: NaiveDateTime) -> Vec<NaiveDateTime> {
    let mut months = Vec::new();
    let (mut year, mut month) = (lo.year(), lo.month());
    loop {
        let Some(first) = NaiveDate::from_ymd_opt(year, month, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
        else {
            break;
        };
        if first > hi {
            break;
        }
        months.push(first);
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn dt(y: i32, mo: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    /// Writes a minimal provider-format swath file.
    fn write_swath(path: &Path, times: &[f64], hs: &[f64], lats: &[f64], lons: &[f64]) {
        let mut file = netcdf::create(path).unwrap();
        file.add_dimension("time", times.len()).unwrap();
        let mut v = file.add_variable::<f64>("time", &["time"]).unwrap();
        v.put_attribute("units", "seconds since 2000-01-01 00:00:00").unwrap();
        v.put_values(times, ..).unwrap();
        let mut v = file.add_variable::<f64>("latitude", &["time"]).unwrap();
        v.put_values(lats, ..).unwrap();
        let mut v = file.add_variable::<f64>("longitude", &["time"]).unwrap();
        v.put_values(lons, ..).unwrap();
        let mut v = file.add_variable::<f64>("VAVH", &["time"]).unwrap();
        v.put_values(hs, ..).unwrap();
    }

    #[test]
    fn normalize_longitude_examples() {
        assert_relative_eq!(normalize_longitude(10.0), 10.0, epsilon = 1e-12);
        assert_relative_eq!(normalize_longitude(190.0), -170.0, epsilon = 1e-12);
        assert_relative_eq!(normalize_longitude(360.0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(normalize_longitude(-180.0), -180.0, epsilon = 1e-12);
        assert_relative_eq!(normalize_longitude(180.0), -180.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_path_list_yields_empty_series() {
        let series = read_swath_files(&[]).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn single_file_assembly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swath.nc");
        let times: Vec<f64> = (0..6).map(|i| i as f64).collect();
        let hs = vec![2.0, 2.1, 2.2, 2.1, 2.0, 1.9];
        let lats = vec![60.0; 6];
        let lons = vec![185.0; 6];
        write_swath(&path, &times, &hs, &lats, &lons);

        let series = read_swath_files(&[path]).unwrap();
        assert_eq!(series.len(), 6);
        assert_eq!(series.times[0], satellite_basetime());
        assert_relative_eq!(series.lons[0], -175.0, epsilon = 1e-12);
        // interior smoothed value is the 5-sample centered mean
        assert_relative_eq!(
            series.hs_smooth[2],
            (2.0 + 2.1 + 2.2 + 2.1 + 2.0) / 5.0,
            epsilon = 1e-12
        );
        assert!(series.hs_smooth[0].is_nan());
    }

    #[test]
    fn multi_file_sort_and_dedupe_first_wins() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.nc");
        let b = dir.path().join("b.nc");
        // File a covers t=10,20; file b covers t=0 and a duplicate t=10
        write_swath(&a, &[10.0, 20.0], &[2.0, 3.0], &[60.0, 61.0], &[5.0, 6.0]);
        write_swath(&b, &[0.0, 10.0], &[1.0, 9.9], &[59.0, 60.5], &[4.0, 5.5]);

        let series = read_swath_files(&[a, b]).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(
            series.times,
            vec![
                satellite_basetime(),
                satellite_basetime() + TimeDelta::seconds(10),
                satellite_basetime() + TimeDelta::seconds(20),
            ]
        );
        // The t=10 sample from file a came first in concatenation order
        assert_relative_eq!(series.hs[1], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn nan_hs_samples_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swath.nc");
        let times: Vec<f64> = (0..5).map(|i| i as f64).collect();
        let hs = vec![2.0, f64::NAN, 2.2, 2.1, 2.0];
        write_swath(&path, &times, &hs, &[60.0; 5], &[5.0; 5]);

        let series = read_swath_files(&[path]).unwrap();
        assert_eq!(series.len(), 4);
        assert!(series.hs.iter().all(|v| !v.is_nan()));
    }

    #[test]
    fn short_series_smooth_is_nan() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swath.nc");
        write_swath(&path, &[0.0, 1.0], &[2.0, 2.1], &[60.0; 2], &[5.0; 2]);
        let series = read_swath_files(&[path]).unwrap();
        assert_eq!(series.len(), 2);
        assert!(series.hs_smooth.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn listing_filters_by_stamp_overlap() {
        let dir = tempfile::tempdir().unwrap();
        let part = dir.path().join("s3a").join("2021").join("01");
        std::fs::create_dir_all(&part).unwrap();
        let inside = part.join("l3_s3a_20210102T060000_20210102T090000_20210102T100000.nc");
        let outside = part.join("l3_s3a_20210110T000000_20210110T030000_20210110T040000.nc");
        let junk = part.join("readme.txt");
        std::fs::write(&inside, b"").unwrap();
        std::fs::write(&outside, b"").unwrap();
        std::fs::write(&junk, b"").unwrap();

        let files = list_swath_files(dir.path(), "s3a", dt(2021, 1, 2, 6), dt(2021, 1, 2, 12), 30)
            .unwrap();
        assert_eq!(files, vec![inside]);
    }

    #[test]
    fn listing_crosses_month_partitions() {
        let dir = tempfile::tempdir().unwrap();
        let jan = dir.path().join("s3a").join("2021").join("01");
        let feb = dir.path().join("s3a").join("2021").join("02");
        std::fs::create_dir_all(&jan).unwrap();
        std::fs::create_dir_all(&feb).unwrap();
        let a = jan.join("l3_s3a_20210131T210000_20210131T230000_20210201T000000.nc");
        let b = feb.join("l3_s3a_20210201T000000_20210201T020000_20210201T030000.nc");
        std::fs::write(&a, b"").unwrap();
        std::fs::write(&b, b"").unwrap();

        let files =
            list_swath_files(dir.path(), "s3a", dt(2021, 1, 31, 20), dt(2021, 2, 1, 3), 0).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn missing_partition_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let files =
            list_swath_files(dir.path(), "s3a", dt(2021, 1, 1, 0), dt(2021, 1, 2, 0), 30).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn months_covering_spans_year_boundary() {
        let months = months_covering(dt(2020, 11, 15, 0), dt(2021, 2, 1, 0));
        assert_eq!(
            months,
            vec![dt(2020, 11, 1, 0), dt(2020, 12, 1, 0), dt(2021, 1, 1, 0), dt(2021, 2, 1, 0)]
        );
    }
}
