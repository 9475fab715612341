//! Retrying, pooled batch download into the year/month partition tree.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::Datelike;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::source::{coverage_start, SwathSource};

/// Batch-download tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    /// Number of concurrent transfers.
    pub workers: usize,
    /// Attempts per file before giving up.
    pub attempts: u32,
    /// Pause between attempts.
    pub retry_delay: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            attempts: 10,
            retry_delay: Duration::from_secs(10),
        }
    }
}

impl FetchConfig {
    /// Sets the worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Sets the per-file attempt budget.
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }

    /// Sets the pause between attempts.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }
}

/// Runs `op` up to `attempts` times with a pause between tries.
///
/// Per-attempt failures are logged at `warn`; exhaustion maps to
/// [`FetchError::RetryExhausted`] naming the file.
pub fn retry<T>(
    name: &str,
    attempts: u32,
    delay: Duration,
    mut op: impl FnMut() -> Result<T, FetchError>,
) -> Result<T, FetchError> {
    for attempt in 1..=attempts {
        match op() {
            Ok(value) => return Ok(value),
            Err(e) => {
                warn!(name, attempt, attempts, error = %e, "fetch attempt failed");
                if attempt < attempts {
                    std::thread::sleep(delay);
                }
            }
        }
    }
    Err(FetchError::RetryExhausted {
        name: name.to_string(),
        attempts,
    })
}

/// Downloads `names` into `dest_root/<YYYY>/<MM>/` on a bounded pool.
///
/// Destination filenames are disjoint, so workers never contend on a
/// path. Files already present are skipped. The first member to exhaust
/// its attempts fails the whole batch. Returns the number of files
/// actually transferred.
pub fn fetch_batch<S: SwathSource>(
    source: &S,
    names: &[String],
    dest_root: &Path,
    config: &FetchConfig,
) -> Result<usize, FetchError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers.max(1))
        .build()
        .map_err(|e| FetchError::Pool {
            reason: e.to_string(),
        })?;

    let fetched = AtomicUsize::new(0);
    pool.install(|| {
        names.par_iter().try_for_each(|name| -> Result<(), FetchError> {
            let stamp = coverage_start(name).ok_or_else(|| FetchError::BadStamp {
                name: name.clone(),
            })?;
            let dir = dest_root
                .join(format!("{:04}", stamp.year()))
                .join(format!("{:02}", stamp.month()));
            std::fs::create_dir_all(&dir)?;
            let dest = dir.join(name);
            if dest.exists() {
                debug!(name, "already downloaded, skipping");
                return Ok(());
            }
            retry(name, config.attempts, config.retry_delay, || {
                source.fetch(name, &dest)
            })?;
            fetched.fetch_add(1, Ordering::Relaxed);
            debug!(name, dest = %dest.display(), "file fetched");
            Ok(())
        })
    })?;
    Ok(fetched.into_inner())
}
