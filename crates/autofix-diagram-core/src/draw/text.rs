//! Text labels for diagram annotations.
//!
//! This module provides types for configuring text appearance, measuring
//! text with real font metrics, and drawing it either as SVG `<text>`
//! elements or as rasterized glyphs on a [`Surface`].
//!
//! # Overview
//!
//! - [`TextDefinition`] - Reusable text style (font, size, weight, style, colors, padding)
//! - [`Text`] - A measured text element combining content with a [`TextDefinition`]
//! - [`TextAlign`] - How a text is anchored to a point
//!
//! # Units
//!
//! Font sizes are in points and all measurements are in points. Lines are
//! spaced at 1.2 times the font size. Raster glyphs are shaped at the
//! surface resolution so they stay sharp at any dpi.
//!
//! # Quick Start
//!
//! ```
//! # use autofix_diagram_core::draw::{TextDefinition, Text, FontWeight};
//! let mut style = TextDefinition::new();
//! style.set_font_size(14);
//! style.set_weight(FontWeight::Bold);
//!
//! let text = Text::new(&style, "Hello, Diagram!");
//! assert!(text.size().width() > 0.0);
//! # use autofix_diagram_core::draw::Drawable;
//! ```
//!
//! # Fonts
//!
//! Fonts are discovered once per process. When the system provides no fonts
//! a warning is logged, measurements fall back to an estimate and raster
//! output carries no glyphs.

use std::{
    fmt,
    sync::{Mutex, OnceLock, PoisonError},
};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Style, SwashCache, Weight};
use log::{info, warn};
use svg::{node::Text as SvgText, node::element as svg_element};

use crate::{
    apply_stroke,
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition, Surface, rectangle},
    geometry::{Bounds, Insets, Point, Size},
};

/// Line spacing as a multiple of the font size.
const LINE_SPACING: f32 = 1.2;

/// Average glyph advance as a fraction of the font size, used without fonts.
const FALLBACK_ADVANCE: f32 = 0.55;

/// Font weight of a text.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    fn to_svg_value(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Bold => "bold",
        }
    }
}

/// Font style (slant) of a text.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl FontStyle {
    fn to_svg_value(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Italic => "italic",
        }
    }
}

/// Horizontal placement of a text relative to its anchor.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlign {
    /// The anchor is at the left edge of the text
    #[default]
    Left,
    /// The anchor is at the horizontal center of the text
    Center,
    /// The anchor is at the right edge of the text
    Right,
}

/// Vertical placement of a text relative to its anchor.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    /// The anchor is at the top edge of the text
    Top,
    /// The anchor is at the vertical center of the text
    Center,
    /// The anchor is on the baseline of the last line
    #[default]
    Baseline,
    /// The anchor is at the bottom edge of the text
    Bottom,
}

impl fmt::Display for HorizontalAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        };
        f.write_str(name)
    }
}

impl fmt::Display for VerticalAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Top => "top",
            Self::Center => "center",
            Self::Baseline => "baseline",
            Self::Bottom => "bottom",
        };
        f.write_str(name)
    }
}

/// Horizontal and vertical alignment of a text against its anchor point.
///
/// Defaults to left/baseline.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TextAlign {
    pub horizontal: HorizontalAlign,
    pub vertical: VerticalAlign,
}

impl TextAlign {
    pub fn new(horizontal: HorizontalAlign, vertical: VerticalAlign) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Centered on both axes.
    pub fn centered() -> Self {
        Self::new(HorizontalAlign::Center, VerticalAlign::Center)
    }
}

/// Defines the visual style for text elements.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"sans-serif"` |
/// | Font size | `10` |
/// | Weight / style | normal |
/// | Text color | `None` (black) |
/// | Background | `None` |
/// | Padding | Zero on all sides |
///
/// # Examples
///
/// ```
/// # use autofix_diagram_core::draw::{FontStyle, TextDefinition};
/// # use autofix_diagram_core::color::Color;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut style = TextDefinition::new();
/// style.set_font_size(9);
/// style.set_style(FontStyle::Italic);
/// style.set_color(Some(Color::new("#666666")?));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    weight: FontWeight,
    style: FontStyle,
    color: Option<Color>,
    background_color: Option<Color>,
    background_stroke: Option<StrokeDefinition>,
    padding: Insets,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in points.
    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    pub fn set_weight(&mut self, weight: FontWeight) {
        self.weight = weight;
    }

    pub fn set_style(&mut self, style: FontStyle) {
        self.style = style;
    }

    /// Sets the text color. `None` renders black.
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    /// Sets the background fill. When set, the text is drawn over a box
    /// covering the text plus its padding, with corners rounded by the
    /// smallest padding.
    pub fn set_background_color(&mut self, color: Option<Color>) {
        self.background_color = color;
    }

    /// Sets the border of the background box.
    pub fn set_background_stroke(&mut self, stroke: Option<StrokeDefinition>) {
        self.background_stroke = stroke;
    }

    /// Sets the padding between the text and the background edges.
    pub fn set_padding(&mut self, padding: Insets) {
        self.padding = padding;
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    pub fn style(&self) -> FontStyle {
        self.style
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn background_color(&self) -> Option<Color> {
        self.background_color
    }

    pub fn background_stroke(&self) -> Option<&StrokeDefinition> {
        self.background_stroke.as_ref()
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }

    fn has_background(&self) -> bool {
        self.background_color.is_some() || self.background_stroke.is_some()
    }

    fn attrs(&self) -> Attrs<'_> {
        let family = match self.font_family.as_str() {
            "sans-serif" => Family::SansSerif,
            "serif" => Family::Serif,
            "monospace" => Family::Monospace,
            "cursive" => Family::Cursive,
            "fantasy" => Family::Fantasy,
            name => Family::Name(name),
        };
        let weight = match self.weight {
            FontWeight::Normal => Weight::NORMAL,
            FontWeight::Bold => Weight::BOLD,
        };
        let style = match self.style {
            FontStyle::Normal => Style::Normal,
            FontStyle::Italic => Style::Italic,
        };
        Attrs::new().family(family).weight(weight).style(style)
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 10,
            weight: FontWeight::default(),
            style: FontStyle::default(),
            color: None,
            background_color: None,
            background_stroke: None,
            padding: Insets::default(),
        }
    }
}

/// Measured extents of a text, excluding padding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Width of the widest line and height of all lines.
    pub size: Size,
    /// Distance from the top of the first line to its baseline.
    pub baseline: f32,
    /// Distance between consecutive baselines.
    pub line_height: f32,
    /// Number of lines.
    pub line_count: usize,
}

impl TextMetrics {
    /// Distance from the top of the text to the baseline of the last line.
    pub fn last_baseline(&self) -> f32 {
        self.baseline + self.line_height * self.line_count.saturating_sub(1) as f32
    }
}

/// A measured text element.
///
/// `Text` pairs content with a [`TextDefinition`] and an alignment. It is
/// measured once on construction; [`Drawable::size`] includes padding.
///
/// ```
/// # use autofix_diagram_core::draw::{Text, TextAlign, TextDefinition};
/// # use autofix_diagram_core::geometry::Point;
/// let style = TextDefinition::new();
/// let text = Text::new(&style, "API").with_align(TextAlign::centered());
///
/// // A centered text is centered on its anchor
/// let center = text.anchored_center(Point::new(50.0, 50.0));
/// assert_eq!(center, Point::new(50.0, 50.0));
/// ```
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
    align: TextAlign,
    line_widths: Vec<f32>,
    metrics: TextMetrics,
}

impl<'a> Text<'a> {
    /// Creates and measures a new text element.
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        let manager = text_manager();
        let font_size = f32::from(definition.font_size());
        let line_height = font_size * LINE_SPACING;

        let mut line_widths = Vec::new();
        let mut baseline = None;
        for line in content.lines() {
            let measured = manager.measure_line(line, definition, font_size);
            baseline.get_or_insert(measured.baseline);
            line_widths.push(measured.width);
        }

        let line_count = line_widths.len();
        let width = line_widths.iter().copied().fold(0.0, f32::max);
        let metrics = TextMetrics {
            size: Size::new(width, line_height * line_count as f32),
            baseline: baseline.unwrap_or_else(|| fallback_baseline(font_size)),
            line_height,
            line_count,
        };

        Self {
            definition,
            content,
            align: TextAlign::default(),
            line_widths,
            metrics,
        }
    }

    /// Sets the alignment against the anchor point (builder style).
    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn content(&self) -> &str {
        self.content
    }

    pub fn definition(&self) -> &TextDefinition {
        self.definition
    }

    pub fn align(&self) -> TextAlign {
        self.align
    }

    /// Measurements of the text itself, without padding.
    pub fn metrics(&self) -> TextMetrics {
        self.metrics
    }

    /// Returns the center of the padded text box for a text anchored at
    /// `anchor` (in y-down figure coordinates) with this text's alignment.
    ///
    /// Alignment applies to the text itself; padding grows around it.
    pub fn anchored_center(&self, anchor: Point) -> Point {
        let TextMetrics { size, .. } = self.metrics;
        let text_center_x = match self.align.horizontal {
            HorizontalAlign::Left => anchor.x() + size.width() / 2.0,
            HorizontalAlign::Center => anchor.x(),
            HorizontalAlign::Right => anchor.x() - size.width() / 2.0,
        };
        let text_center_y = match self.align.vertical {
            VerticalAlign::Top => anchor.y() + size.height() / 2.0,
            VerticalAlign::Center => anchor.y(),
            VerticalAlign::Baseline => {
                anchor.y() - self.metrics.last_baseline() + size.height() / 2.0
            }
            VerticalAlign::Bottom => anchor.y() - size.height() / 2.0,
        };

        let padding = self.definition.padding();
        Point::new(
            text_center_x + (padding.right() - padding.left()) / 2.0,
            text_center_y + (padding.bottom() - padding.top()) / 2.0,
        )
    }

    /// Bounds of the text without padding, for a box centered at `position`.
    fn text_bounds(&self, position: Point) -> Bounds {
        let padding = self.definition.padding();
        let box_bounds = position.to_bounds(self.size());
        Bounds::new_from_top_left(
            Point::new(
                box_bounds.min_x() + padding.left(),
                box_bounds.min_y() + padding.top(),
            ),
            self.metrics.size,
        )
    }

    /// Left edge of line `index` within `text_bounds`.
    fn line_left(&self, text_bounds: Bounds, index: usize) -> f32 {
        let line_width = self.line_widths.get(index).copied().unwrap_or_default();
        match self.align.horizontal {
            HorizontalAlign::Left => text_bounds.min_x(),
            HorizontalAlign::Center => text_bounds.center().x() - line_width / 2.0,
            HorizontalAlign::Right => text_bounds.max_x() - line_width,
        }
    }

    fn background_radius(&self) -> f32 {
        let padding = self.definition.padding();
        padding
            .top()
            .min(padding.right())
            .min(padding.bottom())
            .min(padding.left())
            .max(0.0)
    }
}

impl Drawable for Text<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let definition = self.definition;

        if definition.has_background() {
            let bounds = position.to_bounds(self.size());
            let mut background = svg_element::Rectangle::new()
                .set("x", bounds.min_x())
                .set("y", bounds.min_y())
                .set("width", bounds.width())
                .set("height", bounds.height())
                .set("rx", self.background_radius());

            background = match definition.background_color() {
                Some(fill) => background
                    .set("fill", fill.to_string())
                    .set("fill-opacity", fill.alpha()),
                None => background.set("fill", "none"),
            };
            if let Some(stroke) = definition.background_stroke() {
                background = apply_stroke!(background, stroke);
            }

            output.add_to_layer(RenderLayer::Background, Box::new(background));
        }

        if self.metrics.line_count == 0 {
            return output;
        }

        let text_bounds = self.text_bounds(position);
        let (anchor_x, text_anchor) = match self.align.horizontal {
            HorizontalAlign::Left => (text_bounds.min_x(), "start"),
            HorizontalAlign::Center => (text_bounds.center().x(), "middle"),
            HorizontalAlign::Right => (text_bounds.max_x(), "end"),
        };

        let color = definition.color().unwrap_or_default();
        let mut rendered_text = svg_element::Text::new("")
            .set("text-anchor", text_anchor)
            .set("font-family", definition.font_family())
            .set("font-size", definition.font_size())
            .set("font-weight", definition.weight().to_svg_value())
            .set("font-style", definition.style().to_svg_value())
            .set("fill", color.to_string())
            .set("fill-opacity", color.alpha());

        for (index, line) in self.content.lines().enumerate() {
            let baseline_y = text_bounds.min_y()
                + self.metrics.baseline
                + self.metrics.line_height * index as f32;
            let tspan = svg_element::TSpan::new("")
                .set("x", anchor_x)
                .set("y", baseline_y)
                .add(SvgText::new(line));
            rendered_text = rendered_text.add(tspan);
        }

        output.add_to_layer(RenderLayer::Text, Box::new(rendered_text));
        output
    }

    fn paint(&self, position: Point, surface: &mut Surface) {
        let definition = self.definition;

        if definition.has_background() {
            let bounds = position.to_bounds(self.size());
            if let Some(path) = rectangle::rounded_rect_path(bounds, self.background_radius()) {
                if let Some(fill) = definition.background_color() {
                    surface.fill_path(&path, fill);
                }
                if let Some(stroke) = definition.background_stroke() {
                    surface.stroke_path(&path, stroke);
                }
            }
        }

        let manager = text_manager();
        let scale = surface.scale();
        let device_font_size = f32::from(definition.font_size()) * scale;
        let color = definition.color().unwrap_or_default().to_rgba8();
        let text_bounds = self.text_bounds(position);

        for (index, line) in self.content.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            let line_top = Point::new(
                self.line_left(text_bounds, index),
                text_bounds.min_y() + self.metrics.line_height * index as f32,
            );
            let origin = surface.to_device(line_top);
            let (origin_x, origin_y) = (origin.x().round() as i32, origin.y().round() as i32);

            manager.draw_line(line, definition, device_font_size, color, |x, y, w, h, rgba| {
                surface.blend_device_rect(origin_x + x, origin_y + y, w, h, rgba);
            });
        }
    }

    fn size(&self) -> Size {
        self.metrics.size.add_padding(self.definition.padding())
    }
}

/// Width and baseline of one shaped line.
#[derive(Debug, Clone, Copy)]
struct LineMeasure {
    width: f32,
    baseline: f32,
}

struct FontState {
    font_system: FontSystem,
    swash_cache: SwashCache,
}

/// TextManager handles text measurement and glyph rasterization.
/// It keeps one FontSystem for the whole process since font discovery is expensive.
struct TextManager {
    state: Mutex<FontState>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        let font_system = FontSystem::new();
        let face_count = font_system.db().len();
        if face_count == 0 {
            warn!("No system fonts found, text will be measured approximately and not rasterized");
        } else {
            info!(face_count; "Fonts loaded");
        }
        Self {
            state: Mutex::new(FontState {
                font_system,
                swash_cache: SwashCache::new(),
            }),
        }
    }

    /// Shapes `line` at `font_size` and returns its width and baseline.
    ///
    /// Falls back to an estimate from the character count when no glyphs
    /// are produced.
    fn measure_line(&self, line: &str, definition: &TextDefinition, font_size: f32) -> LineMeasure {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let metrics = Metrics::new(font_size, font_size * LINE_SPACING);

        let mut buffer = Buffer::new(&mut state.font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut state.font_system);
        buffer.set_size(None, None);
        buffer.set_text(line, &definition.attrs(), Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut width: f32 = 0.0;
        let mut baseline = None;
        for run in buffer.layout_runs() {
            if let Some(last) = run.glyphs.last() {
                width = width.max(last.x + last.w);
            }
            baseline.get_or_insert(run.line_y - run.line_top);
        }

        if width <= 0.0 && !line.is_empty() {
            width = line.chars().count() as f32 * font_size * FALLBACK_ADVANCE;
        }

        LineMeasure {
            width,
            baseline: baseline.unwrap_or_else(|| fallback_baseline(font_size)),
        }
    }

    /// Rasterizes `line` at `font_size` pixels, reporting covered pixel
    /// spans relative to the top-left of the line box.
    fn draw_line<F>(
        &self,
        line: &str,
        definition: &TextDefinition,
        font_size: f32,
        rgba: [u8; 4],
        mut f: F,
    ) where
        F: FnMut(i32, i32, u32, u32, [u8; 4]),
    {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let FontState {
            font_system,
            swash_cache,
        } = &mut *guard;
        let metrics = Metrics::new(font_size, font_size * LINE_SPACING);

        let mut buffer = Buffer::new(font_system, metrics);
        let mut buffer = buffer.borrow_with(font_system);
        buffer.set_size(None, None);
        buffer.set_text(line, &definition.attrs(), Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let [r, g, b, a] = rgba;
        buffer.draw(
            swash_cache,
            cosmic_text::Color::rgba(r, g, b, a),
            |x, y, w, h, color| f(x, y, w, h, [color.r(), color.g(), color.b(), color.a()]),
        );
    }
}

fn fallback_baseline(font_size: f32) -> f32 {
    font_size * (LINE_SPACING - 1.0) / 2.0 + font_size * 0.8
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();

fn text_manager() -> &'static TextManager {
    TEXT_MANAGER.get_or_init(TextManager::new)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn render_to_string(output: LayeredOutput) -> String {
        output.render().iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_text_definition_defaults() {
        let def = TextDefinition::new();
        assert_eq!(def.font_family(), "sans-serif");
        assert_eq!(def.font_size(), 10);
        assert_eq!(def.weight(), FontWeight::Normal);
        assert_eq!(def.style(), FontStyle::Normal);
        assert!(def.color().is_none());
        assert!(def.background_color().is_none());
        assert!(def.background_stroke().is_none());
        assert_approx_eq!(f32, def.padding().horizontal_sum(), 0.0);
    }

    #[test]
    fn test_text_definition_setters() {
        let mut def = TextDefinition::new();
        def.set_font_size(18);
        def.set_weight(FontWeight::Bold);
        def.set_style(FontStyle::Italic);
        def.set_color(Some(Color::new("#666666").unwrap()));
        def.set_padding(Insets::uniform(4.0));

        assert_eq!(def.font_size(), 18);
        assert_eq!(def.weight(), FontWeight::Bold);
        assert_eq!(def.style(), FontStyle::Italic);
        assert!(def.color().is_some());
        assert_approx_eq!(f32, def.padding().top(), 4.0);
    }

    #[test]
    fn test_text_align_default_is_left_baseline() {
        let align = TextAlign::default();
        assert_eq!(align.horizontal, HorizontalAlign::Left);
        assert_eq!(align.vertical, VerticalAlign::Baseline);
        assert_eq!(align.vertical.to_string(), "baseline");
    }

    #[test]
    fn test_empty_text_has_no_size() {
        let def = TextDefinition::new();
        let text = Text::new(&def, "");
        assert_eq!(text.metrics().line_count, 0);
        assert_approx_eq!(f32, text.size().width(), 0.0);
        assert_approx_eq!(f32, text.size().height(), 0.0);
    }

    #[test]
    fn test_single_line_metrics() {
        let def = TextDefinition::new();
        let text = Text::new(&def, "Hello World");
        let metrics = text.metrics();

        assert!(metrics.size.width() > 0.0);
        assert_approx_eq!(f32, metrics.size.height(), 12.0);
        assert_approx_eq!(f32, metrics.line_height, 12.0);
        assert!(metrics.baseline > 0.0 && metrics.baseline <= 12.0);
    }

    #[test]
    fn test_multiline_is_taller() {
        let def = TextDefinition::new();
        let single = Text::new(&def, "Line 1");
        let multi = Text::new(&def, "Line 1\nLine 2\nLine 3");

        assert_eq!(multi.metrics().line_count, 3);
        assert_approx_eq!(
            f32,
            multi.size().height(),
            single.size().height() * 3.0,
            epsilon = 0.001
        );
        assert_approx_eq!(
            f32,
            multi.metrics().last_baseline(),
            multi.metrics().baseline + 24.0,
            epsilon = 0.001
        );
    }

    #[test]
    fn test_size_includes_padding() {
        let plain = TextDefinition::new();
        let mut padded = TextDefinition::new();
        padded.set_padding(Insets::uniform(20.0));

        let size_plain = Text::new(&plain, "Test").size();
        let size_padded = Text::new(&padded, "Test").size();

        assert_approx_eq!(f32, size_padded.width() - size_plain.width(), 40.0, epsilon = 0.001);
        assert_approx_eq!(f32, size_padded.height() - size_plain.height(), 40.0, epsilon = 0.001);
    }

    #[test]
    fn test_larger_font_is_larger() {
        let mut small = TextDefinition::new();
        small.set_font_size(8);
        let mut large = TextDefinition::new();
        large.set_font_size(18);

        let small_size = Text::new(&small, "Orchestrator").size();
        let large_size = Text::new(&large, "Orchestrator").size();

        assert!(large_size.width() > small_size.width());
        assert!(large_size.height() > small_size.height());
    }

    #[test]
    fn test_anchored_center_horizontal() {
        let def = TextDefinition::new();
        let anchor = Point::new(100.0, 100.0);
        let text = Text::new(&def, "Issues");
        let width = text.metrics().size.width();

        let left = text
            .clone()
            .with_align(TextAlign::new(HorizontalAlign::Left, VerticalAlign::Center));
        assert_approx_eq!(f32, left.anchored_center(anchor).x(), 100.0 + width / 2.0);

        let right =
            text.clone().with_align(TextAlign::new(HorizontalAlign::Right, VerticalAlign::Center));
        assert_approx_eq!(f32, right.anchored_center(anchor).x(), 100.0 - width / 2.0);

        let centered = text.with_align(TextAlign::centered());
        assert_eq!(centered.anchored_center(anchor), anchor);
    }

    #[test]
    fn test_anchored_center_vertical() {
        let def = TextDefinition::new();
        let anchor = Point::new(0.0, 100.0);
        let text = Text::new(&def, "Save");
        let metrics = text.metrics();

        let top = text
            .clone()
            .with_align(TextAlign::new(HorizontalAlign::Center, VerticalAlign::Top));
        assert_approx_eq!(f32, top.anchored_center(anchor).y(), 106.0);

        let bottom =
            text.clone().with_align(TextAlign::new(HorizontalAlign::Center, VerticalAlign::Bottom));
        assert_approx_eq!(f32, bottom.anchored_center(anchor).y(), 94.0);

        // The baseline lands on the anchor
        let baseline = text.with_align(TextAlign::default());
        let center = baseline.anchored_center(anchor);
        let top_edge = center.y() - metrics.size.height() / 2.0;
        assert_approx_eq!(f32, top_edge + metrics.baseline, 100.0, epsilon = 0.001);
    }

    #[test]
    fn test_render_plain_text() {
        let mut def = TextDefinition::new();
        def.set_weight(FontWeight::Bold);
        let text = Text::new(&def, "Sentry.io").with_align(TextAlign::centered());

        let svg = render_to_string(text.render_to_layers(Point::new(50.0, 50.0)));

        assert!(svg.contains("Sentry.io"));
        assert!(svg.contains(r#"text-anchor="middle""#));
        assert!(svg.contains(r#"font-weight="bold""#));
        assert!(!svg.contains(r#"data-layer="background""#));
    }

    #[test]
    fn test_render_with_background() {
        let mut def = TextDefinition::new();
        def.set_background_color(Some(Color::new("#FFFFCC").unwrap()));
        def.set_background_stroke(Some(StrokeDefinition::solid(
            Color::new("#999999").unwrap(),
            1.0,
        )));
        def.set_padding(Insets::uniform(4.0));
        let text = Text::new(&def, "Data Flow");

        let svg = render_to_string(text.render_to_layers(Point::new(0.0, 0.0)));

        assert!(svg.contains(r#"data-layer="background""#));
        assert!(svg.contains(r#"data-layer="text""#));
        assert!(svg.contains(r#"rx="4""#));
        assert!(svg.contains("#999999") || svg.contains("rgb(153, 153, 153)"));
    }

    #[test]
    fn test_paint_background() {
        let mut def = TextDefinition::new();
        def.set_background_color(Some(Color::new("#FF0000").unwrap()));
        def.set_padding(Insets::uniform(10.0));
        let text = Text::new(&def, "Caption");

        let size = text.size();
        let region = Bounds::new_from_top_left(Point::new(0.0, 0.0), size);
        let mut surface = Surface::new(region, 1.0, Color::new("white").unwrap()).unwrap();
        text.paint(region.center(), &mut surface);

        // Inside the padding, clear of corner rounding and glyphs
        let x = (size.width() / 2.0) as u32;
        assert_eq!(surface.pixel(x, 3), Some([255, 0, 0, 255]));
    }
}
