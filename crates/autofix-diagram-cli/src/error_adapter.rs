//! Error adapter for converting DiagramError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's graphical report handler used by the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use autofix_diagram::DiagramError;

/// Adapter giving a [`DiagramError`] a diagnostic code and help text.
pub struct ErrorAdapter<'a>(pub &'a DiagramError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            DiagramError::Io(_) => "autofix_diagram::io",
            DiagramError::Export(_) => "autofix_diagram::export",
            DiagramError::Canvas(_) => "autofix_diagram::canvas",
            DiagramError::Config(_) => "autofix_diagram::config",
            DiagramError::UnsupportedFormat { .. } => "autofix_diagram::format",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            DiagramError::Io(_) => "check that the output directory exists and is writable",
            DiagramError::Export(_) => "try a lower --dpi",
            DiagramError::UnsupportedFormat { .. } => "use a .png or .svg output path",
            DiagramError::Canvas(_) | DiagramError::Config(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_codes() {
        let err = DiagramError::Config("bad".to_string());
        let adapter = ErrorAdapter(&err);
        assert_eq!(
            adapter.code().map(|code| code.to_string()).as_deref(),
            Some("autofix_diagram::config")
        );
        assert!(adapter.help().is_none());
    }

    #[test]
    fn test_unsupported_format_has_help() {
        let err = DiagramError::UnsupportedFormat {
            path: PathBuf::from("out.jpg"),
            extension: "jpg".to_string(),
        };
        let adapter = ErrorAdapter(&err);
        assert!(adapter.help().is_some());
        assert!(adapter.to_string().contains("jpg"));
    }

    #[test]
    fn test_renders_with_graphical_handler() {
        let err = DiagramError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let mut writer = String::new();
        miette::GraphicalReportHandler::new()
            .render_report(&mut writer, &ErrorAdapter(&err))
            .unwrap();
        assert!(writer.contains("denied"));
    }
}
