//! Pearson correlation and least-squares line fitting

use crate::distributions::students_t_two_tailed;
use primer_core::{sample, Error, Result, Sample, TestOutcome, TwoSampleTest};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Pearson product-moment correlation with its significance test
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationResult {
    /// Correlation coefficient in [-1, 1]
    pub r: f64,
    /// Two-tailed p-value for H0: r = 0
    pub p_value: f64,
    pub n: usize,
}

impl CorrelationResult {
    /// Coefficient of determination
    pub fn r_squared(&self) -> f64 {
        self.r * self.r
    }
}

impl TestOutcome for CorrelationResult {
    fn test_name(&self) -> &'static str {
        "Pearson correlation"
    }

    fn statistic(&self) -> f64 {
        self.r
    }

    fn p_value(&self) -> f64 {
        self.p_value
    }
}

impl fmt::Display for CorrelationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pearson correlation: {:.4}\np-value: {:.4}",
            self.r, self.p_value
        )
    }
}

/// Pearson correlation as a two-sample test over paired observations
#[derive(Debug, Clone, Copy, Default)]
pub struct Pearson;

impl TwoSampleTest for Pearson {
    type Output = CorrelationResult;

    fn test(&self, sample1: &[f64], sample2: &[f64]) -> Result<CorrelationResult> {
        pearson(sample1, sample2)
    }
}

/// Centred cross products of paired data: `(mean_x, mean_y, sxx, syy, sxy)`
fn moments(x: &[f64], y: &[f64]) -> Result<(f64, f64, f64, f64, f64)> {
    sample::validate(x, Sample::MIN_LEN)?;
    sample::validate(y, Sample::MIN_LEN)?;
    if x.len() != y.len() {
        return Err(Error::size_mismatch(x.len(), y.len(), "paired observations"));
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    Ok((mean_x, mean_y, sxx, syy, sxy))
}

/// Pearson correlation of paired observations
///
/// The p-value comes from `t = r * sqrt((n - 2) / (1 - r^2))` on `n - 2`
/// degrees of freedom. Two observations always correlate perfectly, so they
/// report p = 1. Constant input has no defined correlation.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<CorrelationResult> {
    let (_, _, sxx, syy, sxy) = moments(x, y)?;
    if sxx == 0.0 || syy == 0.0 {
        return Err(Error::InvalidInput(
            "correlation is undefined for constant input".to_string(),
        ));
    }

    let n = x.len();
    let r = (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0);
    let p_value = if n == 2 {
        1.0
    } else if r.abs() == 1.0 {
        0.0
    } else {
        let df = (n - 2) as f64;
        let t = r * (df / ((1.0 - r) * (1.0 + r))).sqrt();
        students_t_two_tailed(t, df)?
    };

    debug!(r, p_value, n, "pearson correlation computed");
    Ok(CorrelationResult { r, p_value, n })
}

/// Least-squares straight line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Fitted value at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

impl fmt::Display for LinearFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "y = {:.4}x + {:.4}", self.slope, self.intercept)
    }
}

/// Fit a degree-one polynomial by ordinary least squares
pub fn linear_fit(x: &[f64], y: &[f64]) -> Result<LinearFit> {
    let (mean_x, mean_y, sxx, _, sxy) = moments(x, y)?;
    if sxx == 0.0 {
        return Err(Error::InvalidInput(
            "line fit needs at least two distinct x values".to_string(),
        ));
    }
    let slope = sxy / sxx;
    Ok(LinearFit {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_pearson_reference_values() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 5.0, 4.0, 5.0];
        let result = pearson(&x, &y).unwrap();
        assert_abs_diff_eq!(result.r, 0.7745966692414834, epsilon = 1e-12);
        assert_abs_diff_eq!(result.p_value, 0.124027, epsilon = 1e-5);
        assert_abs_diff_eq!(result.r_squared(), 0.6, epsilon = 1e-12);
        assert_eq!(result.n, 5);
    }

    #[test]
    fn test_perfect_correlation() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [-2.0, -4.0, -6.0, -8.0];
        let result = Pearson.test(&x, &y).unwrap();
        assert_abs_diff_eq!(result.r, -1.0, epsilon = 1e-12);
        assert!(result.p_value < 1e-6);
    }

    #[test]
    fn test_two_points() {
        let result = pearson(&[1.0, 2.0], &[5.0, 3.0]).unwrap();
        assert_abs_diff_eq!(result.r, -1.0, epsilon = 1e-12);
        assert_eq!(result.p_value, 1.0);
    }

    #[test]
    fn test_pearson_errors() {
        assert!(matches!(
            pearson(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            pearson(&[1.0], &[1.0]),
            Err(Error::InsufficientData { .. })
        ));
        assert!(matches!(
            pearson(&[1.0, f64::NAN], &[1.0, 2.0]),
            Err(Error::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_linear_fit() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [1.0, 3.0, 5.0, 7.0];
        let fit = linear_fit(&x, &y).unwrap();
        assert_abs_diff_eq!(fit.slope, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.intercept, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.predict(10.0), 21.0, epsilon = 1e-12);
        assert_eq!(fit.to_string(), "y = 2.0000x + 1.0000");
    }

    #[test]
    fn test_linear_fit_constant_y_is_flat() {
        let fit = linear_fit(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0]).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.intercept, 4.0);
        assert!(linear_fit(&[2.0, 2.0], &[1.0, 3.0]).is_err());
    }
}
