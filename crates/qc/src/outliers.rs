//! Outlier screening for Hs observation series.

use std::collections::BTreeSet;

use nereus_stats::{nanmean, nanstd};
use tracing::debug;

/// Tuning parameters for [`detect_outliers`].
///
/// Defaults match the operational screening of altimeter Hs: values below
/// 1 m are never spike-flagged, values above 30 m are always rejected, and
/// the local z-score baseline spans 25 samples.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierConfig {
    /// Values must exceed this (in m) to be spike-flagged.
    pub lower_limit: f64,
    /// Values above this (in m) are rejected outright.
    pub upper_limit: f64,
    /// Number of samples in the local z-score baseline.
    pub window: usize,
    /// Consecutive samples closer than this (in seconds) count as
    /// neighbors for the tripling test.
    pub max_gap_secs: f64,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self {
            lower_limit: 1.0,
            upper_limit: 30.0,
            window: 25,
            max_gap_secs: 2.0,
        }
    }
}

impl OutlierConfig {
    /// Sets the lower physical limit.
    pub fn with_lower_limit(mut self, limit: f64) -> Self {
        self.lower_limit = limit;
        self
    }

    /// Sets the upper physical limit.
    pub fn with_upper_limit(mut self, limit: f64) -> Self {
        self.upper_limit = limit;
        self
    }

    /// Sets the baseline window length.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Sets the neighbor time-gap threshold in seconds.
    pub fn with_max_gap_secs(mut self, secs: f64) -> Self {
        self.max_gap_secs = secs;
        self
    }
}

/// Local z-score of `values[i]` against a moving baseline.
///
/// Baseline selection: the whole series when it is shorter than the
/// window; the first `window` samples near the leading edge; a centered
/// window in the interior; the trailing `window` samples near the end.
fn local_z(values: &[f64], i: usize, window: usize) -> f64 {
    let len = values.len();
    let half = window / 2;
    let baseline = if len < window {
        &values[..]
    } else if i <= half {
        &values[..window]
    } else if i < len - half {
        &values[i - half..i + half]
    } else {
        &values[len.saturating_sub(window + 1)..len - 1]
    };
    (values[i] - nanmean(baseline)) / nanstd(baseline)
}

/// Flags anomalous samples in an Hs series.
///
/// Three passes whose union is returned as a sorted, deduplicated index
/// set:
///
/// - forward: a sample above the lower limit is flagged when its
///   predecessor is at least triple its value under a small time gap, or
///   when its local z-score exceeds 2;
/// - backward: the mirror rule, with the successor at most a third of the
///   value;
/// - hard limit: any sample above the upper physical limit.
///
/// `times` are numeric instants in seconds (epoch offsets); `_reference`
/// is reserved for comparison against a co-located series and is currently
/// unused. An empty result means no outliers, not a failure.
///
/// # Panics
///
/// Panics if `times` and `values` differ in length.
pub fn detect_outliers(
    times: &[f64],
    values: &[f64],
    _reference: Option<&[f64]>,
    config: &OutlierConfig,
) -> Vec<usize> {
    assert_eq!(times.len(), values.len(), "detect_outliers: series length mismatch");
    let len = values.len();
    let mut flagged: BTreeSet<usize> = BTreeSet::new();

    // forward check
    for i in 1..len {
        let z = local_z(values, i, config.window);
        let gap = times[i] - times[i - 1];
        let spike = if gap < config.max_gap_secs {
            values[i - 1] >= 3.0 * values[i] || z > 2.0
        } else {
            z > 2.0
        };
        if values[i] > config.lower_limit && spike {
            flagged.insert(i);
        }
    }

    // backward check
    for i in 0..len.saturating_sub(1) {
        let z = local_z(values, i, config.window);
        let gap = times[i + 1] - times[i];
        let spike = if gap < config.max_gap_secs {
            values[i + 1] <= values[i] / 3.0 || z > 2.0
        } else {
            z > 2.0
        };
        if values[i] > config.lower_limit && spike {
            flagged.insert(i);
        }
    }

    // hard physical limit
    for (i, &v) in values.iter().enumerate() {
        if v > config.upper_limit {
            flagged.insert(i);
        }
    }

    if flagged.is_empty() {
        debug!("no outliers detected");
    } else {
        debug!(outliers = flagged.len(), values = len, "outliers detected");
    }
    flagged.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One-second sampling cadence.
    fn times(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    #[test]
    fn constant_series_no_flags() {
        let t = times(40);
        let v = vec![2.5; 40];
        assert!(detect_outliers(&t, &v, None, &OutlierConfig::default()).is_empty());
    }

    #[test]
    fn hard_limit_flags_regardless_of_neighbors() {
        let t = times(10);
        let mut v = vec![31.0; 10];
        v[4] = 35.0;
        let idx = detect_outliers(&t, &v, None, &OutlierConfig::default());
        // Every value exceeds the 30 m limit
        assert_eq!(idx, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn single_spike_is_flagged() {
        let t = times(30);
        let mut v = vec![2.0; 30];
        v[15] = 12.0;
        let idx = detect_outliers(&t, &v, None, &OutlierConfig::default());
        assert!(idx.contains(&15));
    }

    #[test]
    fn values_below_lower_limit_never_spike_flagged() {
        let t = times(30);
        // A relative spike that stays below the 1 m limit
        let mut v = vec![0.2; 30];
        v[15] = 0.9;
        let idx = detect_outliers(&t, &v, None, &OutlierConfig::default());
        assert!(idx.is_empty());
    }

    #[test]
    fn tripling_neighbor_rule_under_small_gap() {
        // Short series: z baseline is the whole series; predecessor triple
        // of successor triggers the forward rule even with moderate z
        let t = times(6);
        let v = vec![2.0, 2.0, 9.0, 2.5, 2.0, 2.0];
        let idx = detect_outliers(&t, &v, None, &OutlierConfig::default());
        // 9.0 flagged (spike), 2.5 flagged by forward tripling (9.0 >= 3*2.5)
        assert!(idx.contains(&2));
        assert!(idx.contains(&3));
    }

    #[test]
    fn tripling_rule_suppressed_across_large_gap() {
        // Same values, but a large time gap before index 3 disables the
        // neighbor comparison there
        let t = vec![0.0, 1.0, 2.0, 3600.0, 3601.0, 3602.0];
        let v = vec![2.0, 2.0, 9.0, 2.5, 2.0, 2.0];
        let idx = detect_outliers(&t, &v, None, &OutlierConfig::default());
        assert!(idx.contains(&2));
        assert!(!idx.contains(&3));
    }

    #[test]
    fn result_is_sorted_and_unique() {
        let t = times(30);
        let mut v = vec![2.0; 30];
        v[5] = 40.0;
        v[20] = 14.0;
        let idx = detect_outliers(&t, &v, None, &OutlierConfig::default());
        let mut sorted = idx.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(idx, sorted);
    }

    #[test]
    fn custom_limits_respected() {
        let t = times(5);
        let v = vec![4.0, 4.5, 5.0, 4.5, 4.0];
        let config = OutlierConfig::default().with_upper_limit(4.75);
        let idx = detect_outliers(&t, &v, None, &config);
        assert_eq!(idx, vec![2]);
    }

    #[test]
    fn empty_series() {
        assert!(detect_outliers(&[], &[], None, &OutlierConfig::default()).is_empty());
    }

    #[test]
    fn nan_values_do_not_poison_baseline() {
        let t = times(30);
        let mut v = vec![2.0; 30];
        v[3] = f64::NAN;
        v[15] = 12.0;
        let idx = detect_outliers(&t, &v, None, &OutlierConfig::default());
        assert!(idx.contains(&15));
        assert!(!idx.contains(&3));
    }
}
