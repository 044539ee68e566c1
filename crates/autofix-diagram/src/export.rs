//! Export of laid-out figures.
//!
//! The [`Exporter`] trait turns a [`Figure`] into the bytes of one output
//! format. Exporters never touch the filesystem; writing the result is the
//! renderer's job, so a failed export leaves any existing output untouched.
//!
//! # Available Backends
//!
//! - [`png`]: raster output at a configurable resolution
//! - [`svg`]: vector output in points
//!
//! # Error Handling
//!
//! Export operations return [`Error`], which converts into
//! [`DiagramError::Export`] at the crate boundary.
//!
//! [`DiagramError::Export`]: crate::DiagramError::Export

pub mod png;
pub mod svg;

use thiserror::Error;

use autofix_diagram_core::draw::RasterError;

use crate::layout::Figure;

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Encodes `figure` in the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the figure cannot be drawn or encoded.
    fn export(&self, figure: &Figure) -> Result<Vec<u8>, Error>;
}

/// Errors that can occur during diagram export.
#[derive(Debug, Error)]
pub enum Error {
    /// A rendering or conversion failure described by a message.
    #[error("Render error: {0}")]
    Render(String),

    /// The raster surface could not be created.
    #[error("Raster error: {0}")]
    Raster(#[from] RasterError),

    /// The PNG encoder failed.
    #[error("PNG encoding error: {0}")]
    Encode(#[from] ::png::EncodingError),

    /// An I/O error encountered while producing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
