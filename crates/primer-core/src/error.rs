//! Error types for the stat-primer crates
//!
//! Every primer crate returns this one error type; each re-exports it.

use thiserror::Error;

/// Failure of a statistic, test or chart
#[derive(Error, Debug)]
pub enum Error {
    /// A sample is shorter than the operation needs
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// A sample element is NaN or infinite
    #[error("Invalid value: element {index} is {value}, expected a finite number")]
    InvalidValue { index: usize, value: f64 },

    /// Bad alpha, bin count, quantile level or table shape
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Mismatched lengths, constant input, zero marginals
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A `statrs` distribution could not be built
    #[error("Computation error: {0}")]
    Computation(String),

    /// Chart rendering error
    #[error("Render error: {0}")]
    Render(String),

    /// Reading scores or writing figures failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped foreign error
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Shorthand used across the primer crates
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Paired inputs whose lengths differ
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for a significance level outside (0, 1)
    pub fn invalid_alpha(alpha: f64) -> Self {
        Self::InvalidParameter(format!("Significance level {alpha} must be in (0, 1)"))
    }

    /// Create an error for a quantile level outside [0, 1]
    pub fn invalid_quantile(p: f64) -> Self {
        Self::InvalidParameter(format!("Quantile {p} must be in [0, 1]"))
    }

    /// Create an error for a failed distribution construction
    pub fn distribution(name: &str, err: impl std::fmt::Display) -> Self {
        Self::Computation(format!("Failed to create {name} distribution: {err}"))
    }

    /// Create an error for a chart backend failure
    pub fn render(err: impl std::fmt::Display) -> Self {
        Self::Render(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_problem() {
        let err = Error::InsufficientData { expected: 2, actual: 1 };
        assert_eq!(
            err.to_string(),
            "Insufficient data: expected at least 2 samples, got 1"
        );

        let err = Error::InvalidValue { index: 3, value: f64::NAN };
        assert_eq!(
            err.to_string(),
            "Invalid value: element 3 is NaN, expected a finite number"
        );

        let err = Error::InvalidValue { index: 0, value: f64::NEG_INFINITY };
        assert_eq!(
            err.to_string(),
            "Invalid value: element 0 is -inf, expected a finite number"
        );

        let err = Error::InvalidParameter("bins must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid parameter: bins must be positive");

        let err = Error::Render("backend closed".to_string());
        assert_eq!(err.to_string(), "Render error: backend closed");
    }

    #[test]
    fn test_helper_constructors() {
        let err = Error::size_mismatch(10, 9, "correlation");
        assert_eq!(
            err.to_string(),
            "Invalid input: Size mismatch in correlation: expected 10, got 9"
        );

        let err = Error::invalid_alpha(1.5);
        assert_eq!(
            err.to_string(),
            "Invalid parameter: Significance level 1.5 must be in (0, 1)"
        );

        let err = Error::invalid_quantile(-0.1);
        assert_eq!(err.to_string(), "Invalid parameter: Quantile -0.1 must be in [0, 1]");

        let err = Error::distribution("Student's t", "freedom must be positive");
        assert!(err.to_string().contains("Student's t"));
    }

    #[test]
    fn test_missing_scores_file_is_io() {
        let err: Error = std::fs::read_to_string("/nonexistent/scores.csv")
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().starts_with("IO error"));
    }

    #[test]
    fn test_wraps_anyhow() {
        let err: Error = anyhow::anyhow!("walkthrough aborted").into();
        assert!(matches!(err, Error::Other(_)));
        assert_eq!(err.to_string(), "Other error: walkthrough aborted");
    }
}
