//! NaN-aware statistical helper functions for the nereus validation suite.
//!
//! Observation series routinely carry `NaN` for missing or rejected values.
//! Every function here either ignores NaNs (`nanmean`, `nanstd`) or drops
//! the affected pairs up front (`marginalize`), so downstream formulas only
//! ever see finite values.

use rand::Rng;

/// Arithmetic mean ignoring NaN entries. Returns NaN if no finite values.
pub fn nanmean(data: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut n = 0usize;
    for &x in data {
        if !x.is_nan() {
            sum += x;
            n += 1;
        }
    }
    if n == 0 {
        return f64::NAN;
    }
    sum / n as f64
}

/// Population standard deviation ignoring NaN entries (N denominator,
/// matching `np.nanstd`). Returns NaN if no finite values.
pub fn nanstd(data: &[f64]) -> f64 {
    let m = nanmean(data);
    if m.is_nan() {
        return f64::NAN;
    }
    let mut sum_sq = 0.0;
    let mut n = 0usize;
    for &x in data {
        if !x.is_nan() {
            let d = x - m;
            sum_sq += d * d;
            n += 1;
        }
    }
    (sum_sq / n as f64).sqrt()
}

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sample standard deviation with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn stddev(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let m = data.iter().sum::<f64>() / nf;
    (data.iter().map(|&x| (x - m) * (x - m)).sum::<f64>() / (nf - 1.0)).sqrt()
}

/// Drops index `i` from both series when either value is NaN.
///
/// Mirrors the marginalization step applied before every validation metric:
/// `a[i] + b[i]` is NaN exactly when at least one of the pair is NaN.
/// Returns the surviving values of both series together with the indices
/// (into the original input) that were kept, in input order.
///
/// # Panics
///
/// Panics if the two slices differ in length.
pub fn marginalize(a: &[f64], b: &[f64]) -> (Vec<f64>, Vec<f64>, Vec<usize>) {
    assert_eq!(a.len(), b.len(), "marginalize: series length mismatch");
    let mut a1 = Vec::with_capacity(a.len());
    let mut b1 = Vec::with_capacity(b.len());
    let mut idx = Vec::with_capacity(a.len());
    for i in 0..a.len() {
        if !(a[i] + b[i]).is_nan() {
            a1.push(a[i]);
            b1.push(b[i]);
            idx.push(i);
        }
    }
    (a1, b1, idx)
}

/// Pearson correlation coefficient over two equal-length series.
///
/// Inputs are expected to be already marginalized; NaNs propagate into the
/// result. Returns NaN when either series has zero variance (the caller
/// decides how to treat a degenerate correlation).
///
/// # Panics
///
/// Panics if the two slices differ in length.
pub fn pearson(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "pearson: series length mismatch");
    let n = a.len();
    if n == 0 {
        return f64::NAN;
    }
    let nf = n as f64;
    let ma = a.iter().sum::<f64>() / nf;
    let mb = b.iter().sum::<f64>() / nf;

    let mut sum_ab = 0.0;
    let mut sum_aa = 0.0;
    let mut sum_bb = 0.0;
    for i in 0..n {
        let da = a[i] - ma;
        let db = b[i] - mb;
        sum_ab += da * db;
        sum_aa += da * da;
        sum_bb += db * db;
    }

    let denom = (sum_aa * sum_bb).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    sum_ab / denom
}

/// Draws `reps` bootstrap resamples of `values`, each of the original length.
///
/// Returns the resampled values together with the drawn indices. Plain
/// bootstrapping can destroy temporal dependencies in a time series; model
/// the series first if that matters for the application.
pub fn bootstrap<R: Rng>(
    values: &[f64],
    reps: usize,
    rng: &mut R,
) -> (Vec<Vec<f64>>, Vec<Vec<usize>>) {
    let n = values.len();
    let mut samples = Vec::with_capacity(reps);
    let mut indices = Vec::with_capacity(reps);
    for _ in 0..reps {
        let idx: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
        let vals: Vec<f64> = idx.iter().map(|&i| values[i]).collect();
        samples.push(vals);
        indices.push(idx);
    }
    (samples, indices)
}
