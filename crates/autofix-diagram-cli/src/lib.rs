//! Autofix diagram CLI library
//!
//! This module contains the CLI logic: configuration discovery, command-line
//! overrides and the call into [`DiagramRenderer`].

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;
pub use error_adapter::ErrorAdapter;

use std::path::{Path, PathBuf};

use log::info;

use autofix_diagram::{DiagramError, DiagramRenderer};

/// The line printed on success, naming the written file.
pub fn confirmation(path: &Path) -> String {
    format!("✅ Systems diagram generated: {}", path.display())
}

/// Run the autofix diagram CLI application
///
/// Loads the configuration, applies the command-line overrides and renders
/// the diagram to the output path. Returns the path written.
///
/// # Errors
///
/// Returns `DiagramError` for:
/// - Configuration loading errors
/// - Unsupported output extensions
/// - Rendering errors
/// - File I/O errors
pub fn run(args: &Args) -> Result<PathBuf, DiagramError> {
    info!(output_path = args.output; "Rendering architecture diagram");

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(dpi) = args.dpi {
        app_config.output_mut().set_dpi(dpi);
    }
    app_config.validate().map_err(DiagramError::Config)?;

    let renderer = DiagramRenderer::new(app_config);
    let path = renderer.render(&args.output)?;

    info!(output_file = args.output; "Diagram exported successfully");

    Ok(path)
}
