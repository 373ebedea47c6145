//! Tukey box plot statistics

use primer_core::{numeric, Result};

/// Whisker reach in multiples of the interquartile range
pub const WHISKER_IQR: f64 = 1.5;

/// Quartiles, whisker ends and outliers of one group
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest observation at or above `q1 - 1.5 * IQR`
    pub lower_whisker: f64,
    /// Largest observation at or below `q3 + 1.5 * IQR`
    pub upper_whisker: f64,
    /// Observations beyond the whiskers, ascending
    pub outliers: Vec<f64>,
}

impl BoxStats {
    pub fn from_values(values: &[f64]) -> Result<Self> {
        primer_core::sample::validate(values, 1)?;
        let sorted = numeric::sorted_copy(values);
        let q1 = numeric::quantile_sorted(&sorted, 0.25)?;
        let median = numeric::quantile_sorted(&sorted, 0.5)?;
        let q3 = numeric::quantile_sorted(&sorted, 0.75)?;

        let reach = WHISKER_IQR * (q3 - q1);
        let (low_fence, high_fence) = (q1 - reach, q3 + reach);
        // The quartiles lie within the fences, so both searches succeed
        let lower_whisker = sorted.iter().copied().find(|&v| v >= low_fence).unwrap_or(q1);
        let upper_whisker = sorted.iter().rev().copied().find(|&v| v <= high_fence).unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| !(low_fence..=high_fence).contains(v))
            .collect();

        Ok(Self {
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}
