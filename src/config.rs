//! Walkthrough configuration
//!
//! Every field has a default reproducing the reference walkthrough, so a JSON
//! file only needs the keys it wants to change.

use primer_core::{check_alpha, Error, Result};
use primer_inference::VarianceAssumption;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Parameters of one synthetic normal sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupParams {
    pub mean: f64,
    pub sd: f64,
    pub size: usize,
}

impl GroupParams {
    pub fn new(mean: f64, sd: f64, size: usize) -> Self {
        Self { mean, sd, size }
    }

    fn validate(&self, name: &str) -> Result<()> {
        if !self.mean.is_finite() || !(self.sd.is_finite() && self.sd > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "{name}: mean must be finite and sd positive, got N({}, {})",
                self.mean, self.sd
            )));
        }
        if self.size < 2 {
            return Err(Error::InsufficientData {
                expected: 2,
                actual: self.size,
            });
        }
        Ok(())
    }
}

/// Settings of a walkthrough run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WalkthroughConfig {
    /// Seed of every random stream
    pub seed: u64,
    /// Directory receiving the SVG figures
    pub output_dir: PathBuf,
    /// Render figures at all
    pub figures: bool,
    /// Significance level for verdicts
    pub alpha: f64,
    /// Variance model of the two-group t-test
    pub variance: VarianceAssumption,
    pub group1: GroupParams,
    pub group2: GroupParams,
    /// Observed contingency table for the chi-square test
    pub contingency: Vec<Vec<f64>>,
    /// Yates' correction on 2x2 tables
    pub yates: bool,
    /// Number of `(x, y)` pairs in the correlation example
    pub correlation_size: usize,
    /// Number of standard normal draws tested for normality
    pub normality_size: usize,
    /// Bins of each group in the distribution comparison
    pub comparison_bins: usize,
}

impl Default for WalkthroughConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            output_dir: PathBuf::from("figures"),
            figures: true,
            alpha: 0.05,
            variance: VarianceAssumption::Equal,
            group1: GroupParams::new(75.0, 10.0, 30),
            group2: GroupParams::new(80.0, 10.0, 30),
            contingency: vec![vec![20.0, 30.0], vec![25.0, 25.0]],
            yates: true,
            correlation_size: 100,
            normality_size: 100,
            comparison_bins: 15,
        }
    }
}

impl WalkthroughConfig {
    /// Parse a JSON document, filling missing keys with defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::InvalidInput(format!("walkthrough config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file
    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        check_alpha(self.alpha)?;
        self.group1.validate("group1")?;
        self.group2.validate("group2")?;
        if self.correlation_size < 3 {
            return Err(Error::InvalidParameter(format!(
                "correlation_size must be at least 3, got {}",
                self.correlation_size
            )));
        }
        if self.normality_size < 3 {
            return Err(Error::InvalidParameter(format!(
                "normality_size must be at least 3, got {}",
                self.normality_size
            )));
        }
        if self.comparison_bins == 0 {
            return Err(Error::InvalidParameter(
                "comparison_bins must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
