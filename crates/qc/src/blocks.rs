//! Contiguous-run segmentation of a sampled time series.

/// Splits a series into contiguous blocks separated by sampling gaps.
///
/// A new block starts wherever the step between consecutive instants
/// exceeds `gap` (same unit as `times`). Returns inclusive
/// `(start, end)` index pairs covering the whole series in order; an
/// ungapped series is a single block, and an empty series yields no
/// blocks. `times` must be non-decreasing for the result to be
/// meaningful.
pub fn detect_blocks(times: &[f64], gap: f64) -> Vec<(usize, usize)> {
    if times.is_empty() {
        return Vec::new();
    }

    let mut blocks = Vec::new();
    let mut start = 0usize;
    for i in 1..times.len() {
        if times[i] - times[i - 1] > gap {
            blocks.push((start, i - 1));
            start = i;
        }
    }
    blocks.push((start, times.len() - 1));
    blocks
}
