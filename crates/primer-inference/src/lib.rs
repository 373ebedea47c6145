//! Classical hypothesis tests for the stat-primer walkthrough
//!
//! # Overview
//!
//! The centrepiece is [`summarize`]: the mean and standard deviation of two
//! samples together with an independent two-sample t-test of their
//! difference. Around it sit the other tests the walkthrough demonstrates:
//!
//! - [`t_test`]: Student's pooled or Welch's unequal-variance t-test
//! - [`chi_square_contingency`]: test of independence, with Yates' correction
//!   on 2x2 tables
//! - [`pearson`] and [`linear_fit`]: correlation and a least-squares trend line
//! - [`shapiro_wilk`]: test of normality
//!
//! Every result implements [`TestOutcome`](primer_core::TestOutcome), so a
//! p-value can be classified against a significance level the same way
//! regardless of the test that produced it.
//!
//! # Example
//!
//! ```rust
//! use primer_core::{Significance, TestOutcome};
//! use primer_inference::summarize;
//!
//! let result = summarize(&[1.0, 2.0, 3.0, 4.0, 5.0], &[6.0, 7.0, 8.0, 9.0, 10.0]).unwrap();
//! assert!((result.t_statistic + 5.0).abs() < 1e-9);
//! assert!(matches!(
//!     result.significance(0.05).unwrap(),
//!     Significance::Significant { .. }
//! ));
//! ```

mod chi_square;
mod correlation;
mod distributions;
mod normality;
mod summary;
mod ttest;

pub use chi_square::{chi_square_contingency, ChiSquareResult};
pub use correlation::{linear_fit, pearson, CorrelationResult, LinearFit, Pearson};
pub use normality::{shapiro_wilk, NormalityResult, ShapiroWilk, SHAPIRO_WILK_MAX_N};
pub use summary::{summarize, summarize_with, DescriptiveStats, SummaryResult};
pub use ttest::{t_test, TTest, TTestResult, VarianceAssumption};
