//! Single-sample descriptive summaries

use primer_core::{numeric, Result};
use serde::Serialize;
use std::fmt;

/// Count, location, spread and five-number summary of one sample
///
/// Mirrors the columns of a dataframe `describe()`: quartiles are linearly
/// interpolated and the standard deviation is Bessel-corrected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Description {
    pub count: usize,
    pub mean: f64,
    /// `None` for a single observation
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl Description {
    /// Interquartile range
    pub fn iqr(&self) -> f64 {
        self.q75 - self.q25
    }

    /// Range of the observations
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Describe a sample of at least one finite value
pub fn describe(values: &[f64]) -> Result<Description> {
    numeric::ensure_finite(values)?;
    let sorted = numeric::sorted_copy(values);
    describe_sorted(&sorted)
}

/// Describe pre-sorted, finite data
pub fn describe_sorted(sorted: &[f64]) -> Result<Description> {
    let mean = numeric::mean(sorted)?;
    let std = if sorted.len() > 1 {
        Some(numeric::std_dev(sorted, 1)?)
    } else {
        None
    };

    Ok(Description {
        count: sorted.len(),
        mean,
        std,
        min: sorted[0],
        q25: numeric::quantile_sorted(sorted, 0.25)?,
        median: numeric::quantile_sorted(sorted, 0.5)?,
        q75: numeric::quantile_sorted(sorted, 0.75)?,
        max: sorted[sorted.len() - 1],
    })
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let std = self
            .std
            .map(|s| format!("{s:.2}"))
            .unwrap_or_else(|| "NaN".to_string());
        write!(
            f,
            "count={} mean={:.2} std={} min={:.2} 25%={:.2} 50%={:.2} 75%={:.2} max={:.2}",
            self.count, self.mean, std, self.min, self.q25, self.median, self.q75, self.max
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use primer_core::Error;

    #[test]
    fn test_describe_matches_dataframe_describe() {
        let desc = describe(&[4.0, 1.0, 3.0, 2.0, 10.0]).unwrap();
        assert_eq!(desc.count, 5);
        assert_abs_diff_eq!(desc.mean, 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(desc.std.unwrap(), 3.5355339059327378, epsilon = 1e-12);
        assert_eq!(desc.min, 1.0);
        assert_eq!(desc.q25, 2.0);
        assert_eq!(desc.median, 3.0);
        assert_eq!(desc.q75, 4.0);
        assert_eq!(desc.max, 10.0);
        assert_eq!(desc.iqr(), 2.0);
        assert_eq!(desc.range(), 9.0);
    }

    #[test]
    fn test_single_observation_has_no_std() {
        let desc = describe(&[7.5]).unwrap();
        assert_eq!(desc.count, 1);
        assert!(desc.std.is_none());
        assert_eq!(desc.q25, 7.5);
        assert!(desc.to_string().contains("std=NaN"));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(describe(&[]), Err(Error::InsufficientData { .. })));
        assert!(matches!(
            describe(&[1.0, f64::NAN]),
            Err(Error::InvalidValue { index: 1, .. })
        ));
    }
}
