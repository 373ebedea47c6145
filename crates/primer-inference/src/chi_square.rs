//! Chi-square test of independence for contingency tables

use crate::distributions::chi_squared_upper;
use primer_core::{Error, Result, TestOutcome};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Result of a chi-square test of independence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChiSquareResult {
    pub statistic: f64,
    pub p_value: f64,
    /// `(rows - 1) * (columns - 1)`
    pub dof: usize,
    /// Frequencies expected under independence, same shape as the input
    pub expected: Vec<Vec<f64>>,
    /// Whether Yates' continuity correction was applied
    pub yates_corrected: bool,
}

impl TestOutcome for ChiSquareResult {
    fn test_name(&self) -> &'static str {
        "Chi-square test of independence"
    }

    fn statistic(&self) -> f64 {
        self.statistic
    }

    fn p_value(&self) -> f64 {
        self.p_value
    }
}

impl fmt::Display for ChiSquareResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Chi-square: {:.4}", self.statistic)?;
        writeln!(f, "p-value: {:.4}", self.p_value)?;
        writeln!(f, "Degrees of freedom: {}", self.dof)?;
        write!(f, "Expected frequencies:")?;
        for row in &self.expected {
            let cells: Vec<String> = row.iter().map(|v| format!("{v:.2}")).collect();
            write!(f, "\n  [{}]", cells.join(", "))?;
        }
        Ok(())
    }
}

/// Chi-square test of independence on an observed contingency table
///
/// With `correction` set and exactly one degree of freedom, every observed
/// count is moved up to 0.5 towards its expected count (Yates). A table with
/// zero degrees of freedom yields a statistic of 0 and a p-value of 1.
pub fn chi_square_contingency<R: AsRef<[f64]>>(
    observed: &[R],
    correction: bool,
) -> Result<ChiSquareResult> {
    let rows = observed.len();
    if rows == 0 {
        return Err(Error::InvalidInput("contingency table has no rows".to_string()));
    }
    let cols = observed[0].as_ref().len();
    if cols == 0 {
        return Err(Error::InvalidInput("contingency table has no columns".to_string()));
    }

    for (r, row) in observed.iter().enumerate() {
        let row = row.as_ref();
        if row.len() != cols {
            return Err(Error::size_mismatch(cols, row.len(), &format!("table row {r}")));
        }
        if let Some(c) = row.iter().position(|v| !v.is_finite() || *v < 0.0) {
            return Err(Error::InvalidInput(format!(
                "cell ({r}, {c}) is {}, counts must be finite and non-negative",
                row[c]
            )));
        }
    }

    let row_sums: Vec<f64> = observed.iter().map(|row| row.as_ref().iter().sum()).collect();
    let col_sums: Vec<f64> = (0..cols)
        .map(|c| observed.iter().map(|row| row.as_ref()[c]).sum())
        .collect();
    let total: f64 = row_sums.iter().sum();

    if row_sums.iter().chain(col_sums.iter()).any(|&s| s == 0.0) {
        return Err(Error::InvalidInput(
            "contingency table has a zero row or column total".to_string(),
        ));
    }

    let expected: Vec<Vec<f64>> = row_sums
        .iter()
        .map(|&rs| col_sums.iter().map(|&cs| rs * cs / total).collect())
        .collect();
    let dof = (rows - 1) * (cols - 1);

    if dof == 0 {
        return Ok(ChiSquareResult {
            statistic: 0.0,
            p_value: 1.0,
            dof,
            expected,
            yates_corrected: false,
        });
    }

    let yates_corrected = correction && dof == 1;
    let mut statistic = 0.0;
    for (obs_row, exp_row) in observed.iter().zip(&expected) {
        for (&obs, &exp) in obs_row.as_ref().iter().zip(exp_row) {
            let obs = if yates_corrected {
                let diff = exp - obs;
                obs + diff.signum() * diff.abs().min(0.5)
            } else {
                obs
            };
            statistic += (obs - exp) * (obs - exp) / exp;
        }
    }

    let p_value = chi_squared_upper(statistic, dof)?;
    debug!(statistic, p_value, dof, yates_corrected, "chi-square computed");

    Ok(ChiSquareResult {
        statistic,
        p_value,
        dof,
        expected,
        yates_corrected,
    })
}
