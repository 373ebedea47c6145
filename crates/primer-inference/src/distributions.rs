//! Tail probabilities of the reference distributions

use primer_core::{Error, Result};
use statrs::distribution::{ContinuousCDF, StudentsT};
use statrs::function::{erf, gamma};

/// Two-tailed p-value of a t statistic with `df` degrees of freedom
///
/// Computed from the lower tail at `-|t|` so small p-values keep their
/// precision.
pub(crate) fn students_t_two_tailed(t: f64, df: f64) -> Result<f64> {
    if t.is_nan() {
        return Err(Error::Computation("t statistic is NaN".to_string()));
    }
    if t.is_infinite() {
        return Ok(0.0);
    }
    let dist = StudentsT::new(0.0, 1.0, df).map_err(|e| Error::distribution("Student's t", e))?;
    Ok((2.0 * dist.cdf(-t.abs())).min(1.0))
}

/// Upper tail of a chi-square distribution, `P(X >= x)`
pub(crate) fn chi_squared_upper(x: f64, dof: usize) -> Result<f64> {
    if x <= 0.0 {
        return Ok(1.0);
    }
    gamma::checked_gamma_ur(dof as f64 / 2.0, x / 2.0)
        .map_err(|e| Error::distribution("chi-square", e))
}

/// Upper tail of a normal distribution, `P(X >= x)`
pub(crate) fn normal_upper(x: f64, mean: f64, sd: f64) -> f64 {
    0.5 * erf::erfc((x - mean) / (sd * std::f64::consts::SQRT_2))
}
