//! # stat-primer
//!
//! A walkthrough of descriptive statistics, classical hypothesis tests and
//! charts on seeded synthetic data.
//!
//! ## Crate Organization
//!
//! - `primer-core`: error type, validated samples, numeric helpers, test traits
//! - `primer-describe`: describe tables, grouped scores, histograms, KDE
//! - `primer-inference`: two-sample summary, t-tests, chi-square, Pearson,
//!   Shapiro–Wilk
//! - `primer-viz`: multi-panel SVG figures
//!
//! This crate re-exports all of them and adds the walkthrough driver.
//!
//! ## Quick Start
//!
//! ```rust
//! use stat_primer::prelude::*;
//!
//! let result = summarize(&[1.0, 2.0, 3.0, 4.0, 5.0], &[6.0, 7.0, 8.0, 9.0, 10.0]).unwrap();
//! assert_eq!(result.mean_a, 3.0);
//! assert!(result.is_significant(0.05).unwrap());
//! ```
//!
//! Running the whole walkthrough without writing files:
//!
//! ```rust
//! use stat_primer::{NullFigureSink, Walkthrough, WalkthroughConfig};
//!
//! let report = Walkthrough::new(WalkthroughConfig::default(), NullFigureSink)
//!     .unwrap()
//!     .run()
//!     .unwrap();
//! println!("{report}");
//! ```

pub mod config;
pub mod walkthrough;

// Re-export workspace crates
pub use primer_core;
pub use primer_describe;
pub use primer_inference;
pub use primer_viz;

pub use config::{GroupParams, WalkthroughConfig};
pub use walkthrough::{run_walkthrough, Walkthrough, WalkthroughReport};

pub use primer_core::{Error, Result, Sample, Significance, TestOutcome};
pub use primer_describe::{describe, GroupedSamples};
pub use primer_inference::{summarize, summarize_with, SummaryResult, VarianceAssumption};
pub use primer_viz::{FigureSink, MemoryFigureSink, NullFigureSink, SvgFileSink};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use primer_core::prelude::*;

    pub use primer_describe::{describe, Description, GroupedSamples, Histogram};
    pub use primer_inference::{
        chi_square_contingency, linear_fit, pearson, shapiro_wilk, summarize, summarize_with,
        t_test, SummaryResult, TTest, VarianceAssumption,
    };
    pub use primer_viz::{render_svg, Figure, FigureSink, Panel, Series};

    pub use crate::{Walkthrough, WalkthroughConfig, WalkthroughReport};
}
