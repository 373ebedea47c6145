//! Shapiro–Wilk test of normality
//!
//! Coefficients and p-values follow Royston's approximation (Applied
//! Statistics algorithm AS R94), valid for 3 ≤ n ≤ 5000. The test still runs
//! above 5000 observations but the p-value may be inaccurate.

use crate::distributions::normal_upper;
use primer_core::{numeric, sample, Error, OneSampleTest, Result, TestOutcome};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_3, PI};
use std::fmt;
use tracing::{debug, warn};

/// Largest sample for which the p-value approximation was calibrated
pub const SHAPIRO_WILK_MAX_N: usize = 5000;

const SMALL_RANGE: f64 = 1e-19;

// Polynomial coefficients, lowest order first
const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.071190, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const C3: [f64; 4] = [0.5440, -0.39978, 0.025054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
const G: [f64; 2] = [-2.273, 0.459];

/// Result of a Shapiro–Wilk test
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalityResult {
    /// W statistic in (0, 1]; values near 1 indicate normality
    pub w: f64,
    pub p_value: f64,
    pub n: usize,
}

impl NormalityResult {
    /// Whether normality is retained at `alpha`, i.e. `p > alpha`
    pub fn appears_normal(&self, alpha: f64) -> Result<bool> {
        primer_core::check_alpha(alpha)?;
        Ok(self.p_value > alpha)
    }
}

impl TestOutcome for NormalityResult {
    fn test_name(&self) -> &'static str {
        "Shapiro-Wilk"
    }

    fn statistic(&self) -> f64 {
        self.w
    }

    fn p_value(&self) -> f64 {
        self.p_value
    }
}

impl fmt::Display for NormalityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Test statistic: {:.4}\np-value: {:.4}", self.w, self.p_value)
    }
}

/// Shapiro–Wilk estimator
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapiroWilk;

impl OneSampleTest for ShapiroWilk {
    type Output = NormalityResult;

    fn test(&self, sample: &[f64]) -> Result<NormalityResult> {
        shapiro_wilk(sample)
    }
}

/// Evaluate `c[0] + c[1] x + c[2] x^2 + ...`
fn poly(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// Upper half of the antisymmetric Shapiro–Wilk weights, largest first
fn coefficients(n: usize) -> Result<Vec<f64>> {
    let half = n / 2;
    let mut a = vec![0.0; half];
    if n == 3 {
        a[0] = FRAC_1_SQRT_2;
        return Ok(a);
    }

    let std_normal = Normal::new(0.0, 1.0).map_err(|e| Error::distribution("normal", e))?;
    let an = n as f64;
    let m: Vec<f64> = (1..=half)
        .map(|i| std_normal.inverse_cdf((i as f64 - 0.375) / (an + 0.25)))
        .collect();

    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / an.sqrt();
    let a1 = poly(&C1, rsn) - m[0] / ssumm2;

    let (first_scaled, fac) = if n > 5 {
        let a2 = -m[1] / ssumm2 + poly(&C2, rsn);
        let fac = ((summ2 - 2.0 * m[0] * m[0] - 2.0 * m[1] * m[1])
            / (1.0 - 2.0 * a1 * a1 - 2.0 * a2 * a2))
            .sqrt();
        a[1] = a2;
        (2, fac)
    } else {
        let fac = ((summ2 - 2.0 * m[0] * m[0]) / (1.0 - 2.0 * a1 * a1)).sqrt();
        (1, fac)
    };
    a[0] = a1;
    for i in first_scaled..half {
        a[i] = -m[i] / fac;
    }
    Ok(a)
}

/// p-value of `w` for a sample of size `n`
fn p_value(w: f64, n: usize) -> f64 {
    if n == 3 {
        // Exact distribution for three observations
        return (6.0 / PI * (w.sqrt().asin() - FRAC_PI_3)).clamp(0.0, 1.0);
    }
    if w >= 1.0 {
        return 1.0;
    }

    let an = n as f64;
    let mut y = (1.0 - w).ln();
    let (m, s) = if n <= 11 {
        let gamma = poly(&G, an);
        if y >= gamma {
            return 1e-99;
        }
        y = -(gamma - y).ln();
        (poly(&C3, an), poly(&C4, an).exp())
    } else {
        let ln_n = an.ln();
        (poly(&C5, ln_n), poly(&C6, ln_n).exp())
    };
    normal_upper(y, m, s)
}

/// Shapiro–Wilk test that `values` come from a normal distribution
///
/// Needs at least three finite values that are not all equal.
pub fn shapiro_wilk(values: &[f64]) -> Result<NormalityResult> {
    sample::validate(values, 3)?;
    let n = values.len();
    if n > SHAPIRO_WILK_MAX_N {
        warn!(n, "Shapiro-Wilk p-value may be inaccurate above {SHAPIRO_WILK_MAX_N} observations");
    }

    let sorted = numeric::sorted_copy(values);
    if sorted[n - 1] - sorted[0] < SMALL_RANGE {
        return Err(Error::InvalidInput(
            "normality test needs values that are not all equal".to_string(),
        ));
    }

    let a = coefficients(n)?;
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let ss = numeric::sum_squared_deviations(&sorted, mean);
    let b: f64 = a
        .iter()
        .enumerate()
        .map(|(i, &ai)| ai * (sorted[n - 1 - i] - sorted[i]))
        .sum();
    let w = (b * b / ss).min(1.0);
    let p_value = p_value(w, n);

    debug!(w, p_value, n, "shapiro-wilk computed");
    Ok(NormalityResult { w, p_value, n })
}
