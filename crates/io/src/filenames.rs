//! Filename and directory-partition conventions for persisted products.
//!
//! Collocation and validation output is organized as monthly files under
//! `<root>/CollocationFiles/<sat>/<YYYY>/<MM>/` and
//! `<root>/ValidationFiles/<sat>/<YYYY>/<MM>/`; downloaded swaths live
//! under `<root>/<sat>/<YYYY>/<MM>/` with the provider's
//! `..._<from>_<to>_<created>.nc` timestamp triple in the name.

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDateTime};

/// Timestamp format embedded in swath filenames.
pub const SWATH_STAMP_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Monthly collocation time-series filename.
pub fn coll_filename(model: &str, sat: &str, lead_hours: u32, month: NaiveDateTime) -> String {
    format!(
        "{model}_vs_{sat}_coll_ts_lt{lead_hours:03}h_{}.nc",
        month.format("%Y%m")
    )
}

/// Monthly validation time-series filename.
pub fn val_filename(model: &str, sat: &str, lead_hours: u32, month: NaiveDateTime) -> String {
    format!(
        "{model}_vs_{sat}_val_ts_lt{lead_hours:03}h_{}.nc",
        month.format("%Y%m")
    )
}

/// Partition directory for monthly collocation files.
pub fn coll_dir(root: &Path, sat: &str, month: NaiveDateTime) -> PathBuf {
    root.join("CollocationFiles")
        .join(sat)
        .join(format!("{:04}", month.year()))
        .join(format!("{:02}", month.month()))
}

/// Partition directory for monthly validation files.
pub fn val_dir(root: &Path, sat: &str, month: NaiveDateTime) -> PathBuf {
    root.join("ValidationFiles")
        .join(sat)
        .join(format!("{:04}", month.year()))
        .join(format!("{:02}", month.month()))
}

/// Partition directory for downloaded swath files.
pub fn swath_dir(root: &Path, sat: &str, month: NaiveDateTime) -> PathBuf {
    root.join(sat)
        .join(format!("{:04}", month.year()))
        .join(format!("{:02}", month.month()))
}

/// Observation dump filename covering `[start, end]`.
pub fn obs_dump_filename(sat: &str, region: &str, start: NaiveDateTime, end: NaiveDateTime) -> String {
    format!(
        "{sat}_{region}_{}_{}.nc",
        start.format("%Y%m%d%H%M%S"),
        end.format("%Y%m%d%H%M%S")
    )
}

/// Extracts the coverage interval from a swath filename.
///
/// Provider names end in three `%Y%m%dT%H%M%S` stamps separated by
/// underscores: coverage start, coverage end, creation time. Returns
/// `(from, to)`, or `None` when the name does not carry the triple.
pub fn parse_swath_stamp(name: &str) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let stem = name.strip_suffix(".nc").unwrap_or(name);
    let parts: Vec<&str> = stem.split('_').collect();
    if parts.len() < 3 {
        return None;
    }
    let from = NaiveDateTime::parse_from_str(parts[parts.len() - 3], SWATH_STAMP_FORMAT).ok()?;
    let to = NaiveDateTime::parse_from_str(parts[parts.len() - 2], SWATH_STAMP_FORMAT).ok()?;
    NaiveDateTime::parse_from_str(parts[parts.len() - 1], SWATH_STAMP_FORMAT).ok()?;
    Some((from, to))
}
