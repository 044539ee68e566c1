//! Autofix Diagram - renders the Sentry-Claude Autofix architecture diagram.
//!
//! The diagram is a fixed scene of labeled boxes, arrows, guide lines and a
//! legend. It is placed on a bounded canvas, laid out in points and written
//! as a PNG (default) or an SVG file.
//!
//! # Pipeline
//!
//! ```text
//! architecture::build   -> Canvas (data units, bounds-checked)
//! Figure::from_canvas   -> Figure (points, measured text, tight bounds)
//! Exporter::export      -> bytes (PNG or SVG)
//! DiagramRenderer::render -> file, written once through a temporary sibling
//! ```

pub mod architecture;
pub mod canvas;
pub mod config;
pub mod export;
pub mod layout;

mod error;

pub use autofix_diagram_core::{color, draw, geometry};

pub use error::DiagramError;

use std::{
    ffi::OsStr,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, error, info};
use tempfile::Builder;

use canvas::Canvas;
use config::AppConfig;
use export::{Exporter, png::PngExporter, svg::SvgExporter};
use layout::Figure;

/// The image formats the renderer writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    /// Picks the format from the extension of `path`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::UnsupportedFormat`] for a missing or unknown extension.
    ///
    /// ```
    /// # use autofix_diagram::OutputFormat;
    /// assert_eq!(OutputFormat::from_path("out/diagram.PNG").unwrap(), OutputFormat::Png);
    /// assert_eq!(OutputFormat::from_path("diagram.svg").unwrap(), OutputFormat::Svg);
    /// assert!(OutputFormat::from_path("diagram.jpg").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DiagramError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(OsStr::to_str)
            .unwrap_or_default()
            .to_ascii_lowercase();

        match extension.as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            _ => Err(DiagramError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

/// Builds, lays out and exports the architecture diagram.
///
/// # Examples
///
/// ```rust,no_run
/// use autofix_diagram::{DiagramRenderer, config::AppConfig};
///
/// let renderer = DiagramRenderer::new(AppConfig::default());
/// let path = renderer.render("systems-diagram.png").expect("Failed to render");
/// println!("{}", path.display());
/// ```
#[derive(Debug, Default)]
pub struct DiagramRenderer {
    config: AppConfig,
}

impl DiagramRenderer {
    /// Create a new renderer with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Builds the fixed architecture scene.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::Canvas`] if a primitive is rejected by the canvas.
    pub fn canvas(&self) -> Result<Canvas, DiagramError> {
        let canvas = architecture::build()?;
        debug!(
            boxes = canvas.shapes().len(),
            components = canvas.component_count(),
            connectors = canvas.connectors().len();
            "Canvas built"
        );
        Ok(canvas)
    }

    /// Lays out `canvas` with this renderer's configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::Config`] if the configuration is invalid.
    pub fn figure(&self, canvas: &Canvas) -> Result<Figure, DiagramError> {
        Figure::from_canvas(canvas, &self.config)
    }

    /// Renders `canvas` to PNG bytes at the configured dpi.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::Export`] if the surface cannot be allocated or
    /// the encoder fails.
    pub fn render_png(&self, canvas: &Canvas) -> Result<Vec<u8>, DiagramError> {
        let figure = self.figure(canvas)?;
        let bytes = PngExporter::new(self.config.output().dpi()).export(&figure)?;
        Ok(bytes)
    }

    /// Renders `canvas` to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::Export`] if serialization fails.
    pub fn render_svg(&self, canvas: &Canvas) -> Result<String, DiagramError> {
        let figure = self.figure(canvas)?;
        let bytes = SvgExporter::new().export(&figure)?;
        String::from_utf8(bytes).map_err(|err| DiagramError::Export(Box::new(err)))
    }

    /// Renders the architecture diagram to `path`, overwriting any existing file.
    ///
    /// The format follows the extension of `path`. The image is fully encoded
    /// in memory, written to a temporary file next to `path` and then
    /// renamed over it, so a failure never leaves a partial file behind.
    ///
    /// # Errors
    ///
    /// - [`DiagramError::UnsupportedFormat`] for an unknown extension
    /// - [`DiagramError::Export`] if rendering fails
    /// - [`DiagramError::Io`] if the file cannot be written
    pub fn render(&self, path: impl AsRef<Path>) -> Result<PathBuf, DiagramError> {
        let path = path.as_ref();
        let format = OutputFormat::from_path(path)?;
        info!(output_path:? = path, format:?; "Rendering diagram");

        let canvas = self.canvas()?;
        let bytes = match format {
            OutputFormat::Png => self.render_png(&canvas)?,
            OutputFormat::Svg => self.render_svg(&canvas)?.into_bytes(),
        };

        write_atomically(path, &bytes).inspect_err(|err| {
            error!(output_path:? = path, err:%; "Failed to write diagram");
        })?;

        info!(output_path:? = path, bytes = bytes.len(); "Diagram written");
        Ok(path.to_path_buf())
    }
}

/// Writes `bytes` to a temporary file in the directory of `path`, then
/// renames it to `path`.
///
/// A new file gets the default mode for created files (`0o666` less the
/// umask); a replaced file keeps its permissions.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), DiagramError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = Builder::new();
    builder.prefix(".autofix-diagram");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // The umask is applied when the file is opened.
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    let mut file = builder.tempfile_in(parent)?;
    if let Ok(metadata) = fs::metadata(path) {
        file.as_file().set_permissions(metadata.permissions())?;
    }
    file.write_all(bytes)?;
    file.flush()?;
    file.persist(path).map_err(|err| err.error)?;
    Ok(())
}
