//! Core traits for hypothesis tests
//!
//! Test implementations live in `primer-inference`; this module only fixes the
//! shape every test and every test result shares so the walkthrough and the
//! chart layer can treat them uniformly.

use crate::{Error, Result};
use std::fmt;

/// Common read-only view of a hypothesis test outcome
pub trait TestOutcome {
    /// Human-readable name of the test that produced this outcome
    fn test_name(&self) -> &'static str;

    /// The test statistic
    fn statistic(&self) -> f64;

    /// Two-sided p-value unless the test documents otherwise
    fn p_value(&self) -> f64;

    /// Classify the p-value against a significance level in (0, 1)
    fn significance(&self, alpha: f64) -> Result<Significance> {
        Significance::classify(self.p_value(), alpha)
    }

    /// Whether the null hypothesis is rejected at `alpha`
    fn is_significant(&self, alpha: f64) -> Result<bool> {
        Ok(self.significance(alpha)?.is_significant())
    }
}

/// Trait for tests that compare two samples
///
/// The comparison direction is `sample1` relative to `sample2`; swapping the
/// arguments of a symmetric test flips the sign of its statistic.
pub trait TwoSampleTest {
    /// Output type of the test
    type Output: TestOutcome;

    /// Run the test on two samples
    fn test(&self, sample1: &[f64], sample2: &[f64]) -> Result<Self::Output>;
}

/// Trait for tests that examine a single sample
pub trait OneSampleTest {
    /// Output type of the test
    type Output: TestOutcome;

    /// Run the test on one sample
    fn test(&self, sample: &[f64]) -> Result<Self::Output>;
}

/// Verdict of comparing a p-value with a significance level
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Significance {
    /// p < alpha
    Significant { alpha: f64 },
    /// p >= alpha
    NotSignificant { alpha: f64 },
}

impl Significance {
    /// Compare `p_value` with `alpha`, rejecting levels outside (0, 1)
    pub fn classify(p_value: f64, alpha: f64) -> Result<Self> {
        check_alpha(alpha)?;
        if p_value < alpha {
            Ok(Self::Significant { alpha })
        } else {
            Ok(Self::NotSignificant { alpha })
        }
    }

    /// Whether the null hypothesis is rejected
    pub fn is_significant(&self) -> bool {
        matches!(self, Self::Significant { .. })
    }
}

impl fmt::Display for Significance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Significant { alpha } => write!(f, "Significant difference (p < {alpha})"),
            Self::NotSignificant { alpha } => {
                write!(f, "No significant difference (p >= {alpha})")
            }
        }
    }
}

/// Validate a significance level
pub fn check_alpha(alpha: f64) -> Result<()> {
    if alpha > 0.0 && alpha < 1.0 {
        Ok(())
    } else {
        Err(Error::invalid_alpha(alpha))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f64);

    impl TestOutcome for Fixed {
        fn test_name(&self) -> &'static str {
            "fixed"
        }
        fn statistic(&self) -> f64 {
            0.0
        }
        fn p_value(&self) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_significance_classification() {
        assert!(Fixed(0.01).is_significant(0.05).unwrap());
        assert!(!Fixed(0.05).is_significant(0.05).unwrap());
        assert!(!Fixed(0.5).is_significant(0.05).unwrap());
    }

    #[test]
    fn test_alpha_validated() {
        assert!(Fixed(0.01).is_significant(0.0).is_err());
        assert!(Fixed(0.01).is_significant(1.0).is_err());
        assert!(Fixed(0.01).is_significant(f64::NAN).is_err());
    }

    #[test]
    fn test_significance_display() {
        let verdict = Significance::classify(0.001, 0.05).unwrap();
        assert_eq!(verdict.to_string(), "Significant difference (p < 0.05)");
        let verdict = Significance::classify(0.3, 0.05).unwrap();
        assert_eq!(verdict.to_string(), "No significant difference (p >= 0.05)");
    }
}
