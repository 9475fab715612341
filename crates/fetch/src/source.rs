//! Swath source abstraction and the local-mirror implementation.

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDateTime};

use crate::error::FetchError;

/// A provider of altimeter swath files.
///
/// The transfer protocol stays behind this trait; implementations must
/// be shareable across the worker pool. `list` enumerates the files of
/// one calendar month, `fetch` copies one named file to `dest`.
pub trait SwathSource: Sync {
    /// File names available for the given year and month.
    fn list(&self, year: i32, month: u32) -> Result<Vec<String>, FetchError>;

    /// Transfers one file to the destination path.
    fn fetch(&self, name: &str, dest: &Path) -> Result<(), FetchError>;
}

/// Extracts the coverage-start stamp from a provider filename.
///
/// Provider names end in three `%Y%m%dT%H%M%S` stamps; the first is the
/// coverage start used for windowing and partitioning.
pub fn coverage_start(name: &str) -> Option<NaiveDateTime> {
    let stem = name.strip_suffix(".nc").unwrap_or(name);
    let parts: Vec<&str> = stem.split('_').collect();
    if parts.len() < 3 {
        return None;
    }
    NaiveDateTime::parse_from_str(parts[parts.len() - 3], "%Y%m%dT%H%M%S").ok()
}

/// A mounted archive laid out as `<root>/<YYYY>/<MM>/<file>.nc`.
///
/// Serves as the source for pre-synced provider trees and as the test
/// double for the batch fetcher.
#[derive(Debug, Clone)]
pub struct LocalMirror {
    root: PathBuf,
}

impl LocalMirror {
    /// Creates a mirror rooted at the satellite's partition tree.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn partition(&self, year: i32, month: u32) -> PathBuf {
        self.root.join(format!("{year:04}")).join(format!("{month:02}"))
    }
}

impl SwathSource for LocalMirror {
    fn list(&self, year: i32, month: u32) -> Result<Vec<String>, FetchError> {
        let dir = self.partition(year, month);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with(".nc") {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn fetch(&self, name: &str, dest: &Path) -> Result<(), FetchError> {
        let stamp = coverage_start(name).ok_or_else(|| FetchError::BadStamp {
            name: name.to_string(),
        })?;
        let src = self.partition(stamp.year(), stamp.month()).join(name);
        if !src.is_file() {
            return Err(FetchError::NotFound {
                name: name.to_string(),
            });
        }
        std::fs::copy(&src, dest)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const NAME: &str = "l3_s3a_20210102T060000_20210102T090000_20210102T100000.nc";

    #[test]
    fn coverage_start_parses_first_stamp() {
        let t = coverage_start(NAME).unwrap();
        assert_eq!(
            t,
            NaiveDate::from_ymd_opt(2021, 1, 2).unwrap().and_hms_opt(6, 0, 0).unwrap()
        );
    }

    #[test]
    fn coverage_start_rejects_plain_names() {
        assert!(coverage_start("readme.txt").is_none());
    }

    #[test]
    fn mirror_lists_month_partition() {
        let dir = tempfile::tempdir().unwrap();
        let part = dir.path().join("2021").join("01");
        std::fs::create_dir_all(&part).unwrap();
        std::fs::write(part.join(NAME), b"x").unwrap();
        std::fs::write(part.join("notes.txt"), b"x").unwrap();

        let mirror = LocalMirror::new(dir.path());
        assert_eq!(mirror.list(2021, 1).unwrap(), vec![NAME.to_string()]);
        assert!(mirror.list(2021, 2).unwrap().is_empty());
    }

    #[test]
    fn mirror_fetch_copies_file() {
        let dir = tempfile::tempdir().unwrap();
        let part = dir.path().join("2021").join("01");
        std::fs::create_dir_all(&part).unwrap();
        std::fs::write(part.join(NAME), b"payload").unwrap();

        let out = tempfile::tempdir().unwrap();
        let dest = out.path().join(NAME);
        let mirror = LocalMirror::new(dir.path());
        mirror.fetch(NAME, &dest).unwrap();
        assert_eq!(std::fs::read(dest).unwrap(), b"payload");
    }

    #[test]
    fn mirror_fetch_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mirror = LocalMirror::new(dir.path());
        let err = mirror.fetch(NAME, &dir.path().join("out.nc")).unwrap_err();
        assert!(matches!(err, FetchError::NotFound { .. }));
    }
}
