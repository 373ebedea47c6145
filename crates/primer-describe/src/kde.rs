//! Gaussian kernel density estimation
//!
//! Used for violin outlines. The default bandwidth follows Scott's rule,
//! `h = s * n^(-1/5)` with `s` the Bessel-corrected standard deviation.

use primer_core::{numeric, Error, Result, Sample};
use std::f64::consts::PI;

/// Gaussian KDE over a finite sample
#[derive(Debug, Clone)]
pub struct GaussianKde {
    data: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// Estimate with Scott's rule bandwidth
    pub fn new(values: &[f64]) -> Result<Self> {
        let sample = Sample::new(values.to_vec())?;
        let sd = sample.std_dev();
        if sd <= 0.0 {
            return Err(Error::InvalidInput(
                "kernel density needs non-constant data".to_string(),
            ));
        }
        let bandwidth = sd * (sample.len() as f64).powf(-0.2);
        Ok(Self {
            data: sample.into_inner(),
            bandwidth,
        })
    }

    /// Estimate with an explicit bandwidth
    pub fn with_bandwidth(values: &[f64], bandwidth: f64) -> Result<Self> {
        if !(bandwidth.is_finite() && bandwidth > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "bandwidth {bandwidth} must be positive"
            )));
        }
        let sample = Sample::with_min_len(values.to_vec(), 1)?;
        Ok(Self {
            data: sample.into_inner(),
            bandwidth,
        })
    }

    /// Kernel bandwidth
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Density at `x`
    pub fn density(&self, x: f64) -> f64 {
        let norm = 1.0 / ((2.0 * PI).sqrt() * self.bandwidth * self.data.len() as f64);
        let sum: f64 = self
            .data
            .iter()
            .map(|&xi| {
                let z = (x - xi) / self.bandwidth;
                (-0.5 * z * z).exp()
            })
            .sum();
        norm * sum
    }

    /// Density on `points` evenly spaced positions
    ///
    /// The grid extends `cut` bandwidths beyond the data on both sides.
    pub fn grid(&self, points: usize, cut: f64) -> Vec<(f64, f64)> {
        let lo = self.data.iter().copied().fold(f64::INFINITY, f64::min) - cut * self.bandwidth;
        let hi = self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max) + cut * self.bandwidth;
        numeric::linspace(lo, hi, points)
            .into_iter()
            .map(|x| (x, self.density(x)))
            .collect()
    }
}
