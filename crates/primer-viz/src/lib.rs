//! Multi-panel SVG figures
//!
//! A [`Figure`] is a grid of [`Panel`]s, each drawing one chart kind: line,
//! scatter with trend line, overlaid histograms, bars, Tukey box plots, pies,
//! violins and jittered strips. [`render_svg`] draws a figure with `plotters`;
//! a [`FigureSink`] decides where finished figures go.
//!
//! # Example
//!
//! ```rust
//! use primer_viz::{render_svg, Figure, Panel, Series};
//!
//! let mut figure = Figure::new("demo", 1, 2).with_size(800, 400);
//! figure.push(Panel::line("Ramp", vec![(0.0, 0.0), (1.0, 1.0)])).unwrap();
//! figure
//!     .push(Panel::box_plot("Groups", vec![Series::new("A", vec![1.0, 2.0, 3.0])]))
//!     .unwrap();
//!
//! let svg = render_svg(&figure).unwrap();
//! assert!(svg.contains("<svg"));
//! ```

mod boxplot;
mod figure;
mod render;
mod sink;

pub use boxplot::{BoxStats, WHISKER_IQR};
pub use figure::{Figure, Panel, PanelKind, Series, DEFAULT_SIZE};
pub use render::{render_svg, render_to_file};
pub use sink::{FigureSink, MemoryFigureSink, NullFigureSink, SvgFileSink};
