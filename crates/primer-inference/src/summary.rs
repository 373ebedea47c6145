//! Descriptive and inferential summary of two samples
//!
//! [`summarize`] is the walkthrough's one reusable computation: per-sample
//! mean and Bessel-corrected standard deviation, plus an independent
//! two-sample t-test of the difference in means.

use crate::ttest::{t_test, TTestResult, VarianceAssumption};
use primer_core::{Result, Sample, TestOutcome};
use serde::Serialize;
use std::fmt;
use tracing::{debug, instrument};

/// Immutable two-sample summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryResult {
    pub mean_a: f64,
    /// Standard deviation with divisor n - 1
    pub sd_a: f64,
    pub n_a: usize,
    pub mean_b: f64,
    /// Standard deviation with divisor n - 1
    pub sd_b: f64,
    pub n_b: usize,
    /// Sign follows `mean_a - mean_b`
    pub t_statistic: f64,
    /// Two-tailed
    pub p_value: f64,
    pub df: f64,
    pub assumption: VarianceAssumption,
}

impl SummaryResult {
    /// The per-sample means and standard deviations on their own
    pub fn descriptive(&self) -> DescriptiveStats {
        DescriptiveStats {
            group1_mean: self.mean_a,
            group1_sd: self.sd_a,
            group2_mean: self.mean_b,
            group2_sd: self.sd_b,
        }
    }
}

impl TestOutcome for SummaryResult {
    fn test_name(&self) -> &'static str {
        self.assumption.test_name()
    }

    fn statistic(&self) -> f64 {
        self.t_statistic
    }

    fn p_value(&self) -> f64 {
        self.p_value
    }
}

impl fmt::Display for SummaryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Group 1: Mean={:.2}, SD={:.2}", self.mean_a, self.sd_a)?;
        writeln!(f, "Group 2: Mean={:.2}, SD={:.2}", self.mean_b, self.sd_b)?;
        write!(
            f,
            "{}: t-statistic={:.4}, p-value={:.4}",
            self.test_name(),
            self.t_statistic,
            self.p_value
        )
    }
}

/// Means and standard deviations of two groups
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub group1_mean: f64,
    pub group1_sd: f64,
    pub group2_mean: f64,
    pub group2_sd: f64,
}

impl DescriptiveStats {
    /// Compute directly from two validated samples
    pub fn from_samples(group1: &Sample, group2: &Sample) -> Self {
        Self {
            group1_mean: group1.mean(),
            group1_sd: group1.std_dev(),
            group2_mean: group2.mean(),
            group2_sd: group2.std_dev(),
        }
    }
}

impl From<&SummaryResult> for DescriptiveStats {
    fn from(summary: &SummaryResult) -> Self {
        summary.descriptive()
    }
}

/// Summarize two samples with Student's pooled-variance t-test
pub fn summarize(sample_a: &[f64], sample_b: &[f64]) -> Result<SummaryResult> {
    summarize_with(sample_a, sample_b, VarianceAssumption::default())
}

/// Summarize two samples with an explicit variance model
///
/// Fails with `InsufficientData` when a sample has fewer than two values and
/// with `InvalidValue` when any value is NaN or infinite. Both checks run
/// before anything is computed.
#[instrument(skip(sample_a, sample_b), fields(n_a = sample_a.len(), n_b = sample_b.len()))]
pub fn summarize_with(
    sample_a: &[f64],
    sample_b: &[f64],
    assumption: VarianceAssumption,
) -> Result<SummaryResult> {
    let a = Sample::new(sample_a.to_vec())?;
    let b = Sample::new(sample_b.to_vec())?;
    let TTestResult {
        statistic,
        p_value,
        df,
        ..
    } = t_test(&a, &b, assumption)?;

    let result = SummaryResult {
        mean_a: a.mean(),
        sd_a: a.std_dev(),
        n_a: a.len(),
        mean_b: b.mean(),
        sd_b: b.std_dev(),
        n_b: b.len(),
        t_statistic: statistic,
        p_value,
        df,
        assumption,
    };
    debug!(mean_a = result.mean_a, mean_b = result.mean_b, "summary computed");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use primer_core::Error;

    #[test]
    fn test_reference_example() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [6.0, 7.0, 8.0, 9.0, 10.0];
        let result = summarize(&a, &b).unwrap();

        assert_abs_diff_eq!(result.mean_a, 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.mean_b, 8.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.sd_a, 1.5811, epsilon = 1e-4);
        assert_abs_diff_eq!(result.sd_b, 1.5811, epsilon = 1e-4);
        assert_abs_diff_eq!(result.t_statistic, -5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.df, 8.0);
        assert!(result.p_value < 0.0011);
        assert_abs_diff_eq!(result.p_value, 0.0010528, epsilon = 1e-6);
        assert_eq!((result.n_a, result.n_b), (5, 5));
    }

    #[test]
    fn test_identical_samples() {
        let a = [2.5, 3.1, 4.7, 1.2, 9.9];
        let result = summarize(&a, &a).unwrap();
        assert_eq!(result.t_statistic, 0.0);
        assert_abs_diff_eq!(result.p_value, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_errors_raised_before_computation() {
        assert!(matches!(
            summarize(&[1.0], &[1.0, 2.0]),
            Err(Error::InsufficientData { expected: 2, actual: 1 })
        ));
        assert!(matches!(
            summarize(&[1.0, 2.0], &[]),
            Err(Error::InsufficientData { expected: 2, actual: 0 })
        ));
        assert!(matches!(
            summarize(&[1.0, f64::NAN, 3.0], &[1.0, 2.0]),
            Err(Error::InvalidValue { index: 1, .. })
        ));
        assert!(matches!(
            summarize(&[1.0, 2.0], &[f64::INFINITY, 2.0]),
            Err(Error::InvalidValue { index: 0, .. })
        ));
    }

    #[test]
    fn test_large_finite_values_give_finite_output() {
        let result = summarize(&[1e200, -1e200, 3.0], &[1e200, -1e200, 5.0]).unwrap();
        assert!(result.sd_a.is_finite() && result.sd_b.is_finite());
        assert!((result.sd_a / 1e200 - 1.0).abs() < 1e-12);
        assert!(result.t_statistic.is_finite());

        let result = summarize(&[1e308, 1e308], &[9e307, 1e308]).unwrap();
        assert_eq!(result.mean_a, 1e308);
        assert_eq!(result.sd_a, 0.0);
        assert!(result.t_statistic.is_finite());
        assert!((0.0..=1.0).contains(&result.p_value));
    }

    #[test]
    fn test_descriptive_view() {
        let result = summarize(&[1.0, 3.0], &[2.0, 6.0]).unwrap();
        let stats = DescriptiveStats::from(&result);
        assert_eq!(stats.group1_mean, 2.0);
        assert_eq!(stats.group2_mean, 4.0);
        assert_abs_diff_eq!(stats.group1_sd, 2f64.sqrt(), epsilon = 1e-12);

        let direct = DescriptiveStats::from_samples(
            &Sample::new(vec![1.0, 3.0]).unwrap(),
            &Sample::new(vec![2.0, 6.0]).unwrap(),
        );
        assert_eq!(stats, direct);
    }

    #[test]
    fn test_display_lines() {
        let result = summarize(&[1.0, 2.0, 3.0], &[2.0, 3.0, 4.0]).unwrap();
        let text = result.to_string();
        assert!(text.contains("Group 1: Mean=2.00, SD=1.00"));
        assert!(text.contains("Group 2: Mean=3.00, SD=1.00"));
        assert!(text.contains("t-statistic=-1.2247"));
    }
}
