//! Command-line argument definitions for the autofix diagram CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Every argument is optional: with none, the diagram is
//! written to `systems-diagram.png` in the current directory.

use clap::Parser;

use autofix_diagram::architecture::DEFAULT_OUTPUT;

/// Command-line arguments for the autofix diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the output file (.png or .svg)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Raster resolution, overriding the configuration
    #[arg(long)]
    pub dpi: Option<f32>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["autofix-diagram"]);
        assert_eq!(args.output, "systems-diagram.png");
        assert_eq!(args.config, None);
        assert_eq!(args.dpi, None);
        assert_eq!(args.log_level, "warn");
    }

    #[test]
    fn test_flags() {
        let args = Args::parse_from([
            "autofix-diagram",
            "-o",
            "out.svg",
            "-c",
            "config.toml",
            "--dpi",
            "150",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.output, "out.svg");
        assert_eq!(args.config.as_deref(), Some("config.toml"));
        assert_eq!(args.dpi, Some(150.0));
        assert_eq!(args.log_level, "debug");
    }

    #[test]
    fn test_rejects_positional_input() {
        assert!(Args::try_parse_from(["autofix-diagram", "input.fil"]).is_err());
    }
}
