//! Validation statistics over paired model/observation series.
//!
//! All metrics marginalize first: index `i` is dropped from both series
//! when either value is NaN, and every formula then operates on the
//! surviving paired subset. A [`ValidationSummary`] is recomputed from
//! scratch for each batch of matched pairs, never updated incrementally.

use std::fmt;

use nereus_stats::{marginalize, mean, nanstd, pearson};

/// Agreement statistics between a model series and an observation series.
///
/// Sign convention: differences are `obs - model`, so a positive bias
/// means the observations run higher than the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationSummary {
    /// Mean of `obs - model`.
    pub bias: f64,
    /// Mean squared deviation.
    pub msd: f64,
    /// Root mean squared deviation.
    pub rmsd: f64,
    /// Mean absolute deviation.
    pub mad: f64,
    /// Pearson correlation of the paired subset; NaN when either series
    /// has zero variance.
    pub corr: f64,
    /// Scatter index from RMSD, as a percentage of the mean observation.
    pub si_rmse: f64,
    /// Scatter index from the deviation spread, as a percentage of the
    /// mean observation.
    pub si_std: f64,
    /// Mean of the model series (mean of product).
    pub mean_model: f64,
    /// Mean of the observation series (mean of reference).
    pub mean_obs: f64,
    /// Number of valid pairs the statistics were computed over.
    pub n: usize,
}

impl fmt::Display for ValidationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# ---")?;
        writeln!(f, "Validation stats")?;
        writeln!(f, "# ---")?;
        writeln!(f, "Correlation Coefficient: {:.2}", self.corr)?;
        writeln!(f, "Root Mean Squared Error: {:.2}", self.rmsd)?;
        writeln!(f, "Mean Absolute Error: {:.2}", self.mad)?;
        writeln!(f, "Bias: {:.2}", self.bias)?;
        writeln!(f, "Scatter Index: {:.2}", self.si_std)?;
        writeln!(f, "Mean of Model: {:.2}", self.mean_model)?;
        writeln!(f, "Mean of Observations: {:.2}", self.mean_obs)?;
        write!(f, "Number of Collocated Values: {}", self.n)
    }
}

/// Computes the full validation summary for two equal-length series.
///
/// Returns `None` when no valid pairs survive marginalization; callers
/// treat that as "no data", not as an error.
///
/// # Panics
///
/// Panics if the two slices differ in length.
pub fn validate(model: &[f64], obs: &[f64]) -> Option<ValidationSummary> {
    assert_eq!(model.len(), obs.len(), "validate: series length mismatch");
    let (model, obs, _) = marginalize(model, obs);
    let n = model.len();
    if n == 0 {
        return None;
    }

    let diffs: Vec<f64> = obs.iter().zip(model.iter()).map(|(o, m)| o - m).collect();
    let bias = mean(&diffs);
    let msd = diffs.iter().map(|d| d * d).sum::<f64>() / n as f64;
    let rmsd = msd.sqrt();
    let mad = diffs.iter().map(|d| d.abs()).sum::<f64>() / n as f64;
    let corr = pearson(&model, &obs);

    let mean_obs = mean(&obs);
    let mean_model = mean(&model);
    let si_rmse = rmsd / mean_obs * 100.0;
    let si_std = nanstd(&diffs) / mean_obs * 100.0;

    Some(ValidationSummary {
        bias,
        msd,
        rmsd,
        mad,
        corr,
        si_rmse,
        si_std,
        mean_model,
        mean_obs,
        n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn self_validation_identities() {
        let a = [1.2, 2.5, 0.8, 3.1, 1.9];
        let s = validate(&a, &a).expect("valid pairs");
        assert_abs_diff_eq!(s.bias, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.msd, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.rmsd, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.mad, 0.0, epsilon = 1e-12);
        assert_relative_eq!(s.corr, 1.0, epsilon = 1e-12);
        assert_eq!(s.n, 5);
    }

    #[test]
    fn bias_sign_convention() {
        // Observations consistently 0.5 above the model
        let model = [1.0, 2.0, 3.0];
        let obs = [1.5, 2.5, 3.5];
        let s = validate(&model, &obs).unwrap();
        assert_relative_eq!(s.bias, 0.5, epsilon = 1e-12);
        assert_relative_eq!(s.rmsd, 0.5, epsilon = 1e-12);
        assert_relative_eq!(s.mad, 0.5, epsilon = 1e-12);
        assert_relative_eq!(s.msd, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn marginalization_drops_nan_pairs() {
        let model = [1.0, f64::NAN, 3.0, 4.0];
        let obs = [1.0, 2.0, f64::NAN, 4.0];
        let s = validate(&model, &obs).unwrap();
        assert_eq!(s.n, 2);
        assert_abs_diff_eq!(s.bias, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn all_nan_pairs_gives_none() {
        let model = [f64::NAN, 1.0];
        let obs = [2.0, f64::NAN];
        assert!(validate(&model, &obs).is_none());
    }

    #[test]
    fn empty_input_gives_none() {
        assert!(validate(&[], &[]).is_none());
    }

    #[test]
    fn zero_variance_correlation_is_nan() {
        let model = [2.0, 2.0, 2.0];
        let obs = [1.0, 2.0, 3.0];
        let s = validate(&model, &obs).unwrap();
        assert!(s.corr.is_nan());
    }

    #[test]
    fn scatter_indices() {
        let model = [1.0, 2.0, 3.0, 4.0];
        let obs = [1.4, 1.8, 3.4, 3.8];
        let s = validate(&model, &obs).unwrap();
        // diffs = [0.4, -0.2, 0.4, -0.2]; mean(obs) = 2.6
        let msd: f64 = (0.16 + 0.04 + 0.16 + 0.04) / 4.0;
        assert_relative_eq!(s.si_rmse, msd.sqrt() / 2.6 * 100.0, epsilon = 1e-9);
        // population std of diffs = 0.3
        assert_relative_eq!(s.si_std, 0.3 / 2.6 * 100.0, epsilon = 1e-9);
    }

    #[test]
    fn means_reported() {
        let model = [2.0, 4.0];
        let obs = [3.0, 5.0];
        let s = validate(&model, &obs).unwrap();
        assert_relative_eq!(s.mean_model, 3.0, epsilon = 1e-12);
        assert_relative_eq!(s.mean_obs, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn display_block() {
        let model = [1.0, 2.0, 3.0];
        let obs = [1.5, 2.5, 3.5];
        let s = validate(&model, &obs).unwrap();
        let text = s.to_string();
        assert!(text.contains("Validation stats"));
        assert!(text.contains("Bias: 0.50"));
        assert!(text.contains("Number of Collocated Values: 3"));
    }
}
