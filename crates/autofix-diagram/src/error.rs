//! Error types for diagram rendering.
//!
//! This module provides the main error type [`DiagramError`] which wraps
//! the failures that can occur while building, laying out and writing the
//! diagram.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for diagram operations.
#[derive(Debug, Error)]
pub enum DiagramError {
    /// The output could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The rendering backend failed, e.g. the raster surface could not be allocated.
    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),

    /// A primitive lies outside the canvas or carries an invalid value.
    #[error("Canvas error: {0}")]
    Canvas(String),

    /// The configuration holds an invalid value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The output path has an extension no exporter handles.
    #[error(
        "unsupported output format `{extension}` for `{}` (expected png or svg)",
        path.display()
    )]
    UnsupportedFormat { path: PathBuf, extension: String },
}

impl From<crate::export::Error> for DiagramError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
