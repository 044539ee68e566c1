//! Configuration types for diagram rendering.
//!
//! This module provides configuration structures that control the figure
//! size, the output resolution and padding, and the background. All types
//! implement [`serde::Deserialize`] so they can be loaded from TOML; every
//! field is optional and falls back to the values that reproduce the
//! reference diagram.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration.
//! - [`FigureConfig`] - Figure size in inches.
//! - [`OutputConfig`] - Raster resolution and padding around the content.
//! - [`StyleConfig`] - Visual options such as the background color.
//!
//! # Example
//!
//! ```
//! # use autofix_diagram::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.output().dpi(), 300.0);
//! assert!(config.validate().is_ok());
//! ```

use serde::Deserialize;

use autofix_diagram_core::color::Color;

/// Points per inch.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Figure configuration section.
    #[serde(default)]
    figure: FigureConfig,

    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(figure: FigureConfig, output: OutputConfig, style: StyleConfig) -> Self {
        Self {
            figure,
            output,
            style,
        }
    }

    /// Returns the figure configuration.
    pub fn figure(&self) -> &FigureConfig {
        &self.figure
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Returns a mutable reference to the output configuration.
    pub fn output_mut(&mut self) -> &mut OutputConfig {
        &mut self.output
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Checks every value.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first invalid value: a non-positive or
    /// non-finite figure size or dpi, a negative padding, or an unparsable
    /// background color.
    pub fn validate(&self) -> Result<(), String> {
        positive("figure.width", self.figure.width)?;
        positive("figure.height", self.figure.height)?;
        positive("output.dpi", self.output.dpi)?;
        if !self.output.padding.is_finite() || self.output.padding < 0.0 {
            return Err(format!(
                "output.padding must be a non-negative number, got {}",
                self.output.padding
            ));
        }
        self.style.background_color()?;
        Ok(())
    }
}

fn positive(name: &str, value: f32) -> Result<(), String> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(format!("{name} must be a positive number, got {value}"))
    }
}

/// Figure size, in inches.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    width: f32,
    height: f32,
}

impl FigureConfig {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width in inches.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Height in inches.
    pub fn height(&self) -> f32 {
        self.height
    }
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: 14.0,
            height: 10.0,
        }
    }
}

/// Raster resolution and padding around the drawn content.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    dpi: f32,
    padding: f32,
}

impl OutputConfig {
    pub fn new(dpi: f32, padding: f32) -> Self {
        Self { dpi, padding }
    }

    /// Dots per inch of raster output, also written to the PNG header.
    pub fn dpi(&self) -> f32 {
        self.dpi
    }

    /// Padding around the tight content bounds, in inches.
    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn set_dpi(&mut self, dpi: f32) {
        self.dpi = dpi;
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dpi: 300.0,
            padding: 0.1,
        }
    }
}

/// Visual styling configuration for rendered diagrams.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Background [`Color`] for the whole image, as a color string.
    background_color: String,
}

impl StyleConfig {
    pub fn new(background_color: impl Into<String>) -> Self {
        Self {
            background_color: background_color.into(),
        }
    }

    /// Returns the parsed background [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Color, String> {
        Color::new(&self.background_color)
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::new("white")
    }
}
