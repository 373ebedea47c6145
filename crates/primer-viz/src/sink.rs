//! Destinations for finished figures
//!
//! The walkthrough hands every figure it builds to a [`FigureSink`]; whether
//! that writes SVG files, keeps documents in memory or discards them is the
//! caller's choice.

use crate::figure::Figure;
use crate::render::{render_svg, render_to_file};
use primer_core::Result;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use tracing::info;

/// Receives finished figures
pub trait FigureSink {
    /// Accept a figure, returning where it was written if anywhere
    fn emit(&self, figure: &Figure) -> Result<Option<PathBuf>>;

    /// Check if this sink actually produces output
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Writes each figure to `<output_dir>/<name>.svg`
#[derive(Debug, Clone)]
pub struct SvgFileSink {
    output_dir: PathBuf,
}

impl SvgFileSink {
    /// Create the sink, creating `output_dir` if needed
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path a figure would be written to
    pub fn path_for(&self, figure: &Figure) -> PathBuf {
        self.output_dir.join(format!("{}.svg", figure.name))
    }
}

impl FigureSink for SvgFileSink {
    fn emit(&self, figure: &Figure) -> Result<Option<PathBuf>> {
        let path = self.path_for(figure);
        render_to_file(figure, &path)?;
        info!(path = %path.display(), "figure saved");
        Ok(Some(path))
    }
}

/// Keeps rendered SVG documents in memory
#[derive(Debug, Default)]
pub struct MemoryFigureSink {
    documents: RefCell<Vec<(String, String)>>,
}

impl MemoryFigureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(figure name, svg)` pairs in emission order
    pub fn documents(&self) -> Vec<(String, String)> {
        self.documents.borrow().clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.documents.borrow().iter().map(|(name, _)| name.clone()).collect()
    }
}

impl FigureSink for MemoryFigureSink {
    fn emit(&self, figure: &Figure) -> Result<Option<PathBuf>> {
        let svg = render_svg(figure)?;
        self.documents.borrow_mut().push((figure.name.clone(), svg));
        Ok(None)
    }
}

/// Sink that discards figures without rendering them
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFigureSink;

impl FigureSink for NullFigureSink {
    fn emit(&self, figure: &Figure) -> Result<Option<PathBuf>> {
        figure.validate()?;
        Ok(None)
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
