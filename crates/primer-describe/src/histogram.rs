//! Equal-width histograms

use primer_core::{numeric, Error, Result};
use serde::Serialize;
use std::fmt;

/// A single bin in a histogram
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    /// Left edge of the bin (inclusive)
    pub left: f64,
    /// Right edge of the bin (exclusive, except for the last bin)
    pub right: f64,
    /// Number of values in this bin
    pub count: usize,
}

impl HistogramBin {
    /// Get the center point of the bin
    pub fn center(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    /// Get the width of the bin
    pub fn width(&self) -> f64 {
        self.right - self.left
    }
}

impl fmt::Display for HistogramBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.3}, {:.3}): count={}", self.left, self.right, self.count)
    }
}

/// Frequency histogram over equal-width bins
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    bins: Vec<HistogramBin>,
    total_count: usize,
}

impl Histogram {
    /// Bin finite values into `num_bins` bins spanning their range
    ///
    /// Constant data is centred in a unit-wide range, so a single repeated
    /// value still yields `num_bins` bins.
    pub fn new(values: &[f64], num_bins: usize) -> Result<Self> {
        numeric::ensure_finite(values)?;
        let (lo, hi) = (numeric::min(values)?, numeric::max(values)?);
        let (lo, hi) = if hi - lo > 0.0 {
            (lo, hi)
        } else {
            (lo - 0.5, hi + 0.5)
        };
        Self::with_range(values, num_bins, (lo, hi))
    }

    /// Bin values into `num_bins` bins over an explicit `(lo, hi)` range
    ///
    /// Values outside the range are not counted. The last bin includes `hi`.
    /// Overlaid histograms share a range this way so their bars line up.
    pub fn with_range(values: &[f64], num_bins: usize, range: (f64, f64)) -> Result<Self> {
        let (lo, hi) = range;
        if num_bins == 0 {
            return Err(Error::InvalidParameter(
                "histogram needs at least one bin".to_string(),
            ));
        }
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(Error::InvalidParameter(format!(
                "histogram range ({lo}, {hi}) must be finite and increasing"
            )));
        }
        numeric::ensure_finite(values)?;

        let width = (hi - lo) / num_bins as f64;
        let mut bins: Vec<HistogramBin> = (0..num_bins)
            .map(|i| HistogramBin {
                left: lo + i as f64 * width,
                right: if i == num_bins - 1 {
                    hi
                } else {
                    lo + (i + 1) as f64 * width
                },
                count: 0,
            })
            .collect();

        let mut total_count = 0;
        for &value in values {
            if value < lo || value > hi {
                continue;
            }
            let index = (((value - lo) / width) as usize).min(num_bins - 1);
            bins[index].count += 1;
            total_count += 1;
        }

        Ok(Self { bins, total_count })
    }

    /// Get the bins
    pub fn bins(&self) -> &[HistogramBin] {
        &self.bins
    }

    /// Get the number of bins
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Whether the histogram has no bins
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Number of values that fell inside the range
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Largest bin count
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }

    /// Left edge of the first bin and right edge of the last
    pub fn range(&self) -> (f64, f64) {
        match (self.bins.first(), self.bins.last()) {
            (Some(first), Some(last)) => (first.left, last.right),
            _ => (0.0, 0.0),
        }
    }
}
