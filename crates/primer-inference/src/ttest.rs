//! Independent two-sample t-tests
//!
//! Student's pooled-variance test assumes both groups share one variance;
//! Welch's test drops that assumption and uses the Welch–Satterthwaite
//! degrees of freedom.

use crate::distributions::students_t_two_tailed;
use primer_core::{numeric, sample, Result, Sample, TestOutcome, TwoSampleTest};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

/// Which variance model the two-sample t-test uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarianceAssumption {
    /// Student's test with a pooled variance estimate
    #[default]
    Equal,
    /// Welch's test with separate variances
    Unequal,
}

impl VarianceAssumption {
    /// Name of the resulting test
    pub fn test_name(&self) -> &'static str {
        match self {
            Self::Equal => "Student's t-test",
            Self::Unequal => "Welch's t-test",
        }
    }
}

/// Result of an independent two-sample t-test
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TTestResult {
    /// `(mean1 - mean2) / standard_error`
    pub statistic: f64,
    /// Two-tailed p-value under equal means
    pub p_value: f64,
    /// Degrees of freedom of the reference t distribution
    pub df: f64,
    pub mean_difference: f64,
    pub standard_error: f64,
    pub assumption: VarianceAssumption,
}

impl TestOutcome for TTestResult {
    fn test_name(&self) -> &'static str {
        self.assumption.test_name()
    }

    fn statistic(&self) -> f64 {
        self.statistic
    }

    fn p_value(&self) -> f64 {
        self.p_value
    }
}

impl fmt::Display for TTestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: t = {:.4}, df = {:.2}, p = {:.4}",
            self.test_name(),
            self.statistic,
            self.df,
            self.p_value
        )
    }
}

/// Two-sample t-test estimator
#[derive(Debug, Clone, Copy, Default)]
pub struct TTest {
    assumption: VarianceAssumption,
}

impl TTest {
    /// Create a test with the given variance model
    pub fn new(assumption: VarianceAssumption) -> Self {
        Self { assumption }
    }

    /// Student's pooled-variance test
    pub fn student() -> Self {
        Self::new(VarianceAssumption::Equal)
    }

    /// Welch's unequal-variance test
    pub fn welch() -> Self {
        Self::new(VarianceAssumption::Unequal)
    }

    pub fn assumption(&self) -> VarianceAssumption {
        self.assumption
    }
}

impl TwoSampleTest for TTest {
    type Output = TTestResult;

    fn test(&self, sample1: &[f64], sample2: &[f64]) -> Result<TTestResult> {
        t_test(sample1, sample2, self.assumption)
    }
}

/// Independent two-sample t-test of `sample1` against `sample2`
///
/// Both samples need at least two finite values.
#[instrument(skip(sample1, sample2), fields(n1 = sample1.len(), n2 = sample2.len()))]
pub fn t_test(
    sample1: &[f64],
    sample2: &[f64],
    assumption: VarianceAssumption,
) -> Result<TTestResult> {
    sample::validate(sample1, Sample::MIN_LEN)?;
    sample::validate(sample2, Sample::MIN_LEN)?;

    // One power-of-two scale for both groups keeps t exact and finite near f64::MAX
    let scale = numeric::magnitude_scale(sample1).max(numeric::magnitude_scale(sample2));
    let scaled1: Vec<f64> = sample1.iter().map(|x| x / scale).collect();
    let scaled2: Vec<f64> = sample2.iter().map(|x| x / scale).collect();

    let (n1, n2) = (sample1.len() as f64, sample2.len() as f64);
    let (mean1, mean2) = (numeric::mean(&scaled1)?, numeric::mean(&scaled2)?);
    let (var1, var2) = (numeric::variance(&scaled1, 1)?, numeric::variance(&scaled2, 1)?);
    let mean_difference = mean1 - mean2;

    let (standard_error, df) = match assumption {
        VarianceAssumption::Equal => {
            let df = n1 + n2 - 2.0;
            let pooled = ((n1 - 1.0) * var1 + (n2 - 1.0) * var2) / df;
            ((pooled * (1.0 / n1 + 1.0 / n2)).sqrt(), df)
        }
        VarianceAssumption::Unequal => {
            let (se1, se2) = (var1 / n1, var2 / n2);
            let sum = se1 + se2;
            let denom = se1 * se1 / (n1 - 1.0) + se2 * se2 / (n2 - 1.0);
            // Both variances zero: fall back to the pooled degrees of freedom
            let df = if denom > 0.0 {
                sum * sum / denom
            } else {
                n1 + n2 - 2.0
            };
            (sum.sqrt(), df)
        }
    };

    let (statistic, p_value) = if standard_error > 0.0 {
        let t = mean_difference / standard_error;
        (t, students_t_two_tailed(t, df)?)
    } else if mean_difference == 0.0 {
        (0.0, 1.0)
    } else {
        (mean_difference.signum() * f64::INFINITY, 0.0)
    };

    debug!(statistic, p_value, df, ?assumption, "t-test computed");

    Ok(TTestResult {
        statistic,
        p_value,
        df,
        mean_difference: mean_difference * scale,
        standard_error: standard_error * scale,
        assumption,
    })
}
