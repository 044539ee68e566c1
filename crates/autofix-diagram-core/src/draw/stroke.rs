//! Stroke and line-style definitions.
//!
//! This module provides a unified stroke/line definition shared by boxes,
//! connectors, guides and legend handles.
//!
//! # Overview
//!
//! Exported types:
//! - [`StrokeDefinition`]: The main struct containing all stroke properties
//!   (color, width, style, cap, join)
//! - [`StrokeStyle`]: Enum defining line patterns (solid, dashed, dotted)
//! - [`StrokeCap`]: Enum defining how line endpoints are rendered (butt, round, square)
//! - [`StrokeJoin`]: Enum defining how line corners are rendered (miter, round, bevel)
//! - [`apply_stroke!`](crate::apply_stroke!): Macro for applying stroke attributes to SVG elements
//!
//! # Dash Patterns
//!
//! Named patterns scale with the stroke width, so a 2pt dashed border has
//! dashes twice as long as a 1pt dashed border:
//!
//! | Style | Pattern (multiples of width) |
//! |-------|------------------------------|
//! | `Dashed` | `3.7, 1.6` |
//! | `Dotted` | `1, 1.65` |
//!
//! # Quick Start
//!
//! ```
//! use autofix_diagram_core::draw::{StrokeDefinition, StrokeStyle, StrokeCap};
//! use autofix_diagram_core::color::Color;
//!
//! let stroke = StrokeDefinition::solid(Color::new("black").unwrap(), 2.0);
//! assert!(stroke.dash_array().is_none());
//!
//! let mut stroke = StrokeDefinition::dashed(Color::new("blue").unwrap(), 2.0);
//! stroke.set_cap(StrokeCap::Round);
//! assert_eq!(stroke.dash_array(), Some(vec![7.4, 3.2]));
//! ```

use crate::color::Color;

/// Defines the visual style of a stroke, including dash patterns.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum StrokeStyle {
    /// Solid continuous line (default)
    #[default]
    Solid,
    /// Dashed line
    Dashed,
    /// Dotted line
    Dotted,
}

impl StrokeStyle {
    /// Returns the dash pattern for a stroke of the given width, or `None`
    /// for solid lines.
    pub fn dash_array(&self, width: f32) -> Option<Vec<f32>> {
        let unit: &[f32] = match self {
            Self::Solid => return None,
            Self::Dashed => &[3.7, 1.6],
            Self::Dotted => &[1.0, 1.65],
        };
        Some(unit.iter().map(|length| length * width).collect())
    }
}

/// Defines how line endpoints are rendered.
///
/// Maps directly to SVG `stroke-linecap` attribute values.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeCap {
    /// Flat cap at the exact endpoint (SVG default)
    #[default]
    Butt,
    /// Rounded cap extending beyond the endpoint by half the stroke width
    Round,
    /// Square cap extending beyond the endpoint by half the stroke width
    Square,
}

impl StrokeCap {
    /// Returns the SVG stroke-linecap value
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

/// Defines how line corners (joins) are rendered.
///
/// Maps directly to SVG `stroke-linejoin` attribute values.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeJoin {
    /// Sharp corner with mitered point (SVG default)
    #[default]
    Miter,
    /// Rounded corner
    Round,
    /// Beveled (cut-off) corner
    Bevel,
}

impl StrokeJoin {
    /// Returns the SVG stroke-linejoin value
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Round => "round",
            Self::Bevel => "bevel",
        }
    }
}

/// A stroke definition for rendering lines and borders.
///
/// # Fields
///
/// - `color`: The stroke color; its alpha is the stroke opacity
/// - `width`: The stroke width in points
/// - `style`: The stroke pattern (solid, dashed, etc.)
/// - `cap`: How line endpoints are rendered
/// - `join`: How line corners are rendered
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
    cap: StrokeCap,
    join: StrokeJoin,
}

impl StrokeDefinition {
    /// Creates a new solid stroke with the given color and width.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            ..Self::default()
        }
    }

    /// Creates a solid stroke (convenience constructor).
    pub fn solid(color: Color, width: f32) -> Self {
        Self::new(color, width)
    }

    /// Creates a dashed stroke (convenience constructor).
    pub fn dashed(color: Color, width: f32) -> Self {
        let mut stroke = Self::new(color, width);
        stroke.set_style(StrokeStyle::Dashed);
        stroke
    }

    /// Creates a dotted stroke (convenience constructor).
    pub fn dotted(color: Color, width: f32) -> Self {
        let mut stroke = Self::new(color, width);
        stroke.set_style(StrokeStyle::Dotted);
        stroke
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the stroke style.
    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    /// Returns the stroke cap style.
    pub fn cap(&self) -> StrokeCap {
        self.cap
    }

    /// Returns the stroke join style.
    pub fn join(&self) -> StrokeJoin {
        self.join
    }

    /// Returns the dash pattern scaled to this stroke's width.
    pub fn dash_array(&self) -> Option<Vec<f32>> {
        self.style.dash_array(self.width)
    }

    /// Returns the SVG `stroke-dasharray` value, or `None` for solid strokes.
    pub fn svg_dasharray(&self) -> Option<String> {
        self.dash_array().map(|lengths| {
            lengths
                .iter()
                .map(|length| format!("{length}"))
                .collect::<Vec<_>>()
                .join(",")
        })
    }

    /// Sets the stroke color.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Sets the stroke width.
    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    /// Sets the stroke style.
    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    /// Sets the stroke cap style.
    pub fn set_cap(&mut self, cap: StrokeCap) {
        self.cap = cap;
    }

    /// Sets the stroke join style.
    pub fn set_join(&mut self, join: StrokeJoin) {
        self.join = join;
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self {
            color: Color::default(),
            width: 1.0,
            style: StrokeStyle::default(),
            cap: StrokeCap::default(),
            join: StrokeJoin::default(),
        }
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// This macro applies the complete stroke definition including color, opacity,
/// width, line cap, line join, and dash pattern (if not solid) to any SVG element.
///
/// # Examples
///
/// ```
/// use autofix_diagram_core::draw::StrokeDefinition;
/// use autofix_diagram_core::color::Color;
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::dashed(Color::new("black").unwrap(), 2.0);
/// let rect = svg_element::Rectangle::new()
///     .set("width", 100)
///     .set("height", 50);
///
/// let rect = autofix_diagram_core::apply_stroke!(rect, &stroke);
/// assert!(rect.to_string().contains("stroke-dasharray"));
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width())
            .set("stroke-linecap", $stroke.cap().to_svg_value())
            .set("stroke-linejoin", $stroke.join().to_svg_value());

        if let Some(dasharray) = $stroke.svg_dasharray() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_stroke_default() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.color().to_string(), "black");
        assert_eq!(*stroke.style(), StrokeStyle::Solid);
        assert_eq!(stroke.cap(), StrokeCap::Butt);
        assert_eq!(stroke.join(), StrokeJoin::Miter);
    }

    #[test]
    fn test_stroke_constructors() {
        let color = Color::new("red").unwrap();

        let solid = StrokeDefinition::solid(color, 2.0);
        assert_eq!(solid.width(), 2.0);
        assert_eq!(*solid.style(), StrokeStyle::Solid);

        let dashed = StrokeDefinition::dashed(color, 1.5);
        assert_eq!(*dashed.style(), StrokeStyle::Dashed);

        let dotted = StrokeDefinition::dotted(color, 1.0);
        assert_eq!(*dotted.style(), StrokeStyle::Dotted);
    }

    #[test]
    fn test_stroke_setters() {
        let mut stroke = StrokeDefinition::default();

        stroke.set_color(Color::new("green").unwrap());
        stroke.set_width(2.5);
        stroke.set_style(StrokeStyle::Dashed);
        stroke.set_cap(StrokeCap::Square);
        stroke.set_join(StrokeJoin::Bevel);

        assert_eq!(stroke.color().to_string(), "green");
        assert_eq!(stroke.width(), 2.5);
        assert_eq!(*stroke.style(), StrokeStyle::Dashed);
        assert_eq!(stroke.cap(), StrokeCap::Square);
        assert_eq!(stroke.join(), StrokeJoin::Bevel);
    }

    #[test]
    fn test_dash_array_scales_with_width() {
        let dashes = StrokeStyle::Dashed.dash_array(2.0).unwrap();
        assert_approx_eq!(f32, dashes[0], 7.4);
        assert_approx_eq!(f32, dashes[1], 3.2);

        let dots = StrokeStyle::Dotted.dash_array(1.0).unwrap();
        assert_approx_eq!(f32, dots[0], 1.0);
        assert_approx_eq!(f32, dots[1], 1.65);

        assert!(StrokeStyle::Solid.dash_array(3.0).is_none());
    }

    #[test]
    fn test_svg_dasharray() {
        let black = Color::default();
        assert_eq!(StrokeDefinition::solid(black, 1.0).svg_dasharray(), None);
        assert_eq!(
            StrokeDefinition::dotted(black, 2.0).svg_dasharray(),
            Some("2,3.3".to_string())
        );
    }
}
