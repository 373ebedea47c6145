//! Figure model
//!
//! A [`Figure`] is a grid of [`Panel`]s laid out row by row. The model only
//! holds data; [`crate::render`] turns it into SVG.

use primer_core::{numeric, Error, Result};
use primer_inference::LinearFit;

/// Default figure size in pixels
pub const DEFAULT_SIZE: (u32, u32) = (1500, 1000);

/// A labelled sequence of observations
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }
}

/// What a panel draws
#[derive(Debug, Clone, PartialEq)]
pub enum PanelKind {
    /// Connected line through `points`
    Line { points: Vec<(f64, f64)> },
    /// Point cloud with an optional least-squares trend line
    Scatter {
        points: Vec<(f64, f64)>,
        trend: Option<LinearFit>,
    },
    /// One or more histograms sharing their bin edges
    Histogram {
        series: Vec<Series>,
        bins: usize,
        /// Fill opacity in (0, 1]
        alpha: f64,
    },
    /// One bar per category
    Bar { categories: Vec<(String, f64)> },
    /// Tukey box plot per group
    BoxPlot { groups: Vec<Series> },
    /// Share of a whole per slice, labelled with percentages
    Pie { slices: Vec<(String, f64)> },
    /// Mirrored kernel density per group
    Violin { groups: Vec<Series> },
    /// Every observation per group, jittered horizontally
    Strip {
        groups: Vec<Series>,
        /// Half-width of the horizontal jitter in category units
        jitter: f64,
        seed: u64,
    },
}

/// One chart within a figure
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub kind: PanelKind,
}

impl Panel {
    pub fn new(title: impl Into<String>, kind: PanelKind) -> Self {
        Self {
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            kind,
        }
    }

    /// Set the axis descriptions
    pub fn with_labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    pub fn line(title: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Self::new(title, PanelKind::Line { points })
    }

    pub fn scatter(title: impl Into<String>, points: Vec<(f64, f64)>, trend: Option<LinearFit>) -> Self {
        Self::new(title, PanelKind::Scatter { points, trend })
    }

    pub fn histogram(title: impl Into<String>, series: Vec<Series>, bins: usize, alpha: f64) -> Self {
        Self::new(
            title,
            PanelKind::Histogram {
                series,
                bins,
                alpha,
            },
        )
    }

    pub fn bar(title: impl Into<String>, categories: Vec<(String, f64)>) -> Self {
        Self::new(title, PanelKind::Bar { categories })
    }

    pub fn box_plot(title: impl Into<String>, groups: Vec<Series>) -> Self {
        Self::new(title, PanelKind::BoxPlot { groups })
    }

    pub fn pie(title: impl Into<String>, slices: Vec<(String, f64)>) -> Self {
        Self::new(title, PanelKind::Pie { slices })
    }

    pub fn violin(title: impl Into<String>, groups: Vec<Series>) -> Self {
        Self::new(title, PanelKind::Violin { groups })
    }

    pub fn strip(title: impl Into<String>, groups: Vec<Series>, jitter: f64, seed: u64) -> Self {
        Self::new(title, PanelKind::Strip { groups, jitter, seed })
    }

    /// Check that the panel can be drawn
    pub fn validate(&self) -> Result<()> {
        let context = |msg: &str| Error::InvalidInput(format!("panel '{}': {msg}", self.title));

        match &self.kind {
            PanelKind::Line { points } | PanelKind::Scatter { points, .. } => {
                if points.is_empty() {
                    return Err(context("no points"));
                }
                if points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
                    return Err(context("points must be finite"));
                }
            }
            PanelKind::Histogram { series, bins, alpha } => {
                if *bins == 0 {
                    return Err(Error::InvalidParameter(format!(
                        "panel '{}': histogram needs at least one bin",
                        self.title
                    )));
                }
                if !(*alpha > 0.0 && *alpha <= 1.0) {
                    return Err(Error::InvalidParameter(format!(
                        "panel '{}': opacity {alpha} must be in (0, 1]",
                        self.title
                    )));
                }
                validate_series(series, 1).map_err(|e| context(&e.to_string()))?;
            }
            PanelKind::Bar { categories } => {
                if categories.is_empty() {
                    return Err(context("no categories"));
                }
                numeric::ensure_finite(&categories.iter().map(|(_, v)| *v).collect::<Vec<_>>())?;
            }
            PanelKind::Pie { slices } => {
                if slices.iter().any(|(_, v)| !v.is_finite() || *v < 0.0) {
                    return Err(context("slice sizes must be finite and non-negative"));
                }
                if slices.iter().map(|(_, v)| v).sum::<f64>() <= 0.0 {
                    return Err(context("slices sum to zero"));
                }
            }
            PanelKind::BoxPlot { groups } | PanelKind::Violin { groups } => {
                validate_series(groups, 1).map_err(|e| context(&e.to_string()))?;
            }
            PanelKind::Strip { groups, jitter, .. } => {
                if !(0.0..0.5).contains(jitter) {
                    return Err(Error::InvalidParameter(format!(
                        "panel '{}': jitter {jitter} must be in [0, 0.5)",
                        self.title
                    )));
                }
                validate_series(groups, 1).map_err(|e| context(&e.to_string()))?;
            }
        }
        Ok(())
    }
}

fn validate_series(series: &[Series], min_len: usize) -> Result<()> {
    if series.is_empty() {
        return Err(Error::InvalidInput("no series".to_string()));
    }
    for s in series {
        primer_core::sample::validate(&s.values, min_len)?;
    }
    Ok(())
}

/// A grid of panels saved as one image
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// File stem used by sinks
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub rows: usize,
    pub cols: usize,
    pub panels: Vec<Panel>,
}

impl Figure {
    pub fn new(name: impl Into<String>, rows: usize, cols: usize) -> Self {
        Self {
            name: name.into(),
            width: DEFAULT_SIZE.0,
            height: DEFAULT_SIZE.1,
            rows,
            cols,
            panels: Vec::new(),
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Append a panel in the next free cell
    pub fn push(&mut self, panel: Panel) -> Result<()> {
        if self.panels.len() >= self.capacity() {
            return Err(Error::InvalidParameter(format!(
                "figure '{}' has room for {} panels",
                self.name,
                self.capacity()
            )));
        }
        self.panels.push(panel);
        Ok(())
    }

    pub fn with_panel(mut self, panel: Panel) -> Result<Self> {
        self.push(panel)?;
        Ok(self)
    }

    pub fn capacity(&self) -> usize {
        self.rows * self.cols
    }

    /// Check the layout and every panel
    pub fn validate(&self) -> Result<()> {
        if self.capacity() == 0 || self.width == 0 || self.height == 0 {
            return Err(Error::InvalidParameter(format!(
                "figure '{}' has an empty layout",
                self.name
            )));
        }
        if self.panels.len() > self.capacity() {
            return Err(Error::size_mismatch(
                self.capacity(),
                self.panels.len(),
                "figure panels",
            ));
        }
        self.panels.iter().try_for_each(Panel::validate)
    }
}
