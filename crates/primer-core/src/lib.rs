//! Core types for the stat-primer workspace
//!
//! This crate provides the pieces every other primer crate shares:
//!
//! - [`Error`] and [`Result`]: the one error type of the workspace
//! - [`Sample`]: a validated, finite, non-trivial sequence of observations
//! - [`numeric`]: moments, order statistics and interpolated quantiles
//! - [`TestOutcome`], [`TwoSampleTest`], [`OneSampleTest`]: the shape of a
//!   hypothesis test and its result
//!
//! # Example
//!
//! ```rust
//! use primer_core::{numeric, Sample};
//!
//! let sample = Sample::new(vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
//! assert_eq!(sample.mean(), 3.0);
//! assert!((sample.std_dev() - 1.5811).abs() < 1e-4);
//! assert_eq!(numeric::median(&sample).unwrap(), 3.0);
//! ```

pub mod error;
pub mod numeric;
pub mod sample;
pub mod traits;

// Re-export core types
pub use error::{Error, Result};
pub use sample::Sample;
pub use traits::{check_alpha, OneSampleTest, Significance, TestOutcome, TwoSampleTest};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::{OneSampleTest, Result, Sample, Significance, TestOutcome, TwoSampleTest};
}
