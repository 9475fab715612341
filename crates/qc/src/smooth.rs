//! Running-mean smoothing with local dispersion.

use nereus_stats::{mean, nanstd};

use crate::error::QcError;

/// Where the averaging window sits relative to the output position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Window starts at the current sample and extends forward.
    Leading,
    /// Window is centered on the current sample (odd lengths only).
    Centered,
    /// Window ends at the current sample.
    Trailing,
}

/// Computes a moving average and the matching local standard deviation.
///
/// Both outputs have the same length as the input; positions where a full
/// window is unavailable are NaN rather than extrapolated. The local
/// standard deviation is the population deviation of each window. NaN
/// inputs propagate through every window that covers them.
///
/// # Errors
///
/// [`QcError::InvalidWindow`] when the window is zero, longer than the
/// series, or even with [`Alignment::Centered`].
pub fn running_mean(
    values: &[f64],
    window: usize,
    alignment: Alignment,
) -> Result<(Vec<f64>, Vec<f64>), QcError> {
    if window == 0 {
        return Err(QcError::InvalidWindow {
            window,
            reason: "window must be at least 1".to_string(),
        });
    }
    if window > values.len() {
        return Err(QcError::InvalidWindow {
            window,
            reason: format!("window exceeds series length {}", values.len()),
        });
    }
    if alignment == Alignment::Centered && window % 2 == 0 {
        return Err(QcError::InvalidWindow {
            window,
            reason: "centered alignment requires an odd window".to_string(),
        });
    }

    let len = values.len();
    let mut out = vec![f64::NAN; len];
    let mut std = vec![f64::NAN; len];
    let positions = len - window + 1;

    for i in 0..positions {
        // i is the first index covered by the window
        let slice = &values[i..i + window];
        let target = match alignment {
            Alignment::Leading => i,
            Alignment::Centered => i + window / 2,
            Alignment::Trailing => i + window - 1,
        };
        out[target] = window_mean(slice);
        std[target] = window_std(slice);
    }

    Ok((out, std))
}

/// Plain mean over a full window; NaN poisons the result.
fn window_mean(slice: &[f64]) -> f64 {
    mean(slice)
}

/// Population standard deviation over a full window; NaN poisons the
/// result through the mean.
fn window_std(slice: &[f64]) -> f64 {
    if slice.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }
    nanstd(slice)
}
