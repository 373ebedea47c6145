//! Descriptive statistics for the stat-primer walkthrough
//!
//! - [`describe`]: count, mean, std and five-number summary of one sample
//! - [`GroupedSamples`]: long-format `(group, score)` data with per-group
//!   summaries, optionally loaded from CSV (feature `csv`)
//! - [`Histogram`]: equal-width frequency bins
//! - [`GaussianKde`]: kernel density estimates for violin plots
//!
//! # Example
//!
//! ```rust
//! use primer_describe::{describe, GroupedSamples};
//!
//! let desc = describe(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
//! assert_eq!(desc.median, 3.0);
//!
//! let grouped = GroupedSamples::from_records(vec![("A", 1.0), ("B", 4.0), ("A", 3.0)]).unwrap();
//! let summary = grouped.describe_groups().unwrap();
//! assert_eq!(summary.get("A").unwrap().mean, 2.0);
//! ```

mod describe;
mod group;
mod histogram;
mod kde;

pub use describe::{describe, describe_sorted, Description};
pub use group::{GroupSummary, GroupedSamples, ScoreRecord};
pub use histogram::{Histogram, HistogramBin};
pub use kde::GaussianKde;
