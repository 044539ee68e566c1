//! The canvas data model.
//!
//! A [`Canvas`] is a bounded coordinate space in data units (y pointing up)
//! holding the literal primitives of a diagram: [`Shape`]s, [`Connector`]s,
//! [`Guide`]s, [`Label`]s and an optional [`Legend`]. Primitives are
//! immutable once added; every coordinate is checked against the canvas
//! bounds at insertion and rejected rather than clamped.
//!
//! # Example
//!
//! ```
//! # use autofix_diagram::canvas::{Canvas, Shape};
//! # use autofix_diagram_core::geometry::{Point, Size};
//! let mut canvas = Canvas::new(10.0, 10.0).unwrap();
//! canvas
//!     .add_shape(Shape::new("Sentry", Point::new(0.5, 7.5), Size::new(2.0, 1.0)))
//!     .unwrap();
//!
//! // Out of bounds is an error
//! let outside = Shape::new("Sentry", Point::new(9.5, 9.5), Size::new(2.0, 1.0));
//! assert!(canvas.add_shape(outside).is_err());
//! ```

use std::collections::HashSet;

use autofix_diagram_core::{
    color::Color,
    draw::{ArrowDirection, FontStyle, FontWeight, StrokeStyle, TextAlign},
    geometry::{Bounds, Point, Size},
};

use crate::DiagramError;

/// Corner style of a [`Shape`].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum CornerStyle {
    #[default]
    Square,
    /// Rounded corners; the box grows by `pad` data units on every side.
    Rounded { pad: f32 },
}

/// A box on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    component: String,
    origin: Point,
    size: Size,
    corner: CornerStyle,
    edge_color: Color,
    fill_color: Color,
    line_width: f32,
    line_style: StrokeStyle,
}

impl Shape {
    /// Creates a square, black-edged, white-filled box with its lower-left
    /// corner at `origin`, tagged with the component it depicts.
    pub fn new(component: impl Into<String>, origin: Point, size: Size) -> Self {
        Self {
            component: component.into(),
            origin,
            size,
            corner: CornerStyle::Square,
            edge_color: Color::default(),
            fill_color: Color::new("white").unwrap_or_default(),
            line_width: 1.0,
            line_style: StrokeStyle::Solid,
        }
    }

    pub fn with_corner(mut self, corner: CornerStyle) -> Self {
        self.corner = corner;
        self
    }

    pub fn with_edge_color(mut self, color: Color) -> Self {
        self.edge_color = color;
        self
    }

    pub fn with_fill_color(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    pub fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    pub fn with_line_style(mut self, style: StrokeStyle) -> Self {
        self.line_style = style;
        self
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    /// Lower-left corner.
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn corner(&self) -> CornerStyle {
        self.corner
    }

    pub fn edge_color(&self) -> Color {
        self.edge_color
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn line_style(&self) -> &StrokeStyle {
        &self.line_style
    }

    /// The box without its rounding pad, in data units.
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_points(
            self.origin,
            Point::new(
                self.origin.x() + self.size.width(),
                self.origin.y() + self.size.height(),
            ),
        )
    }
}

/// A straight arrow between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    start: Point,
    end: Point,
    direction: ArrowDirection,
    color: Color,
    line_style: StrokeStyle,
    line_width: f32,
    mutation_scale: f32,
}

impl Connector {
    /// Creates a solid black connector, 1pt wide, with mutation scale 10.
    pub fn new(start: Point, end: Point, direction: ArrowDirection) -> Self {
        Self {
            start,
            end,
            direction,
            color: Color::default(),
            line_style: StrokeStyle::Solid,
            line_width: 1.0,
            mutation_scale: 10.0,
        }
    }

    /// Sets the color; its alpha is the connector opacity.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_line_style(mut self, style: StrokeStyle) -> Self {
        self.line_style = style;
        self
    }

    pub fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    /// Sets the scale that sizes the arrowheads, in points.
    pub fn with_mutation_scale(mut self, scale: f32) -> Self {
        self.mutation_scale = scale;
        self
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn direction(&self) -> ArrowDirection {
        self.direction
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn line_style(&self) -> &StrokeStyle {
        &self.line_style
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn mutation_scale(&self) -> f32 {
        self.mutation_scale
    }
}

/// A plain line without arrowheads.
#[derive(Debug, Clone, PartialEq)]
pub struct Guide {
    start: Point,
    end: Point,
    color: Color,
    line_style: StrokeStyle,
    line_width: f32,
}

impl Guide {
    /// Creates a dotted black guide, 1pt wide.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            color: Color::default(),
            line_style: StrokeStyle::Dotted,
            line_width: 1.0,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_line_style(mut self, style: StrokeStyle) -> Self {
        self.line_style = style;
        self
    }

    pub fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn line_style(&self) -> &StrokeStyle {
        &self.line_style
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }
}

/// Rounded box drawn behind a [`Label`].
#[derive(Debug, Clone, PartialEq)]
pub struct LabelBackground {
    /// Fill color.
    pub fill: Color,
    /// Border color, drawn 1pt wide.
    pub edge: Color,
    /// Padding around the text, in multiples of the font size.
    pub pad: f32,
}

/// A text annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    position: Point,
    text: String,
    font_size: u16,
    weight: FontWeight,
    style: FontStyle,
    color: Option<Color>,
    align: TextAlign,
    background: Option<LabelBackground>,
}

impl Label {
    /// Creates a 10pt black label anchored left/baseline at `position`.
    pub fn new(position: Point, text: impl Into<String>) -> Self {
        Self {
            position,
            text: text.into(),
            font_size: 10,
            weight: FontWeight::Normal,
            style: FontStyle::Normal,
            color: None,
            align: TextAlign::default(),
            background: None,
        }
    }

    pub fn with_font_size(mut self, size: u16) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn with_background(mut self, background: LabelBackground) -> Self {
        self.background = Some(background);
        self
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
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

    pub fn align(&self) -> TextAlign {
        self.align
    }

    pub fn background(&self) -> Option<&LabelBackground> {
        self.background.as_ref()
    }
}

/// The sample drawn next to a legend entry.
#[derive(Debug, Clone, PartialEq)]
pub enum LegendHandle {
    /// A filled swatch.
    Patch { fill: Color, edge: Color },
    /// A line sample.
    Line {
        color: Color,
        style: StrokeStyle,
        width: f32,
    },
}

/// One legend row: a handle and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub handle: LegendHandle,
}

impl LegendEntry {
    pub fn patch(label: impl Into<String>, fill: Color, edge: Color) -> Self {
        Self {
            label: label.into(),
            handle: LegendHandle::Patch { fill, edge },
        }
    }

    pub fn line(label: impl Into<String>, color: Color, style: StrokeStyle, width: f32) -> Self {
        Self {
            label: label.into(),
            handle: LegendHandle::Line {
                color,
                style,
                width,
            },
        }
    }
}

/// A framed legend anchored at the lower center of the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    entries: Vec<LegendEntry>,
    columns: usize,
    font_size: u16,
}

impl Legend {
    /// Creates a legend laid out in `columns` columns, filled column by column.
    pub fn new(entries: Vec<LegendEntry>, columns: usize, font_size: u16) -> Self {
        Self {
            entries,
            columns,
            font_size,
        }
    }

    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }
}

/// A bounded 2D canvas holding every primitive of a diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    bounds: Bounds,
    shapes: Vec<Shape>,
    connectors: Vec<Connector>,
    guides: Vec<Guide>,
    labels: Vec<Label>,
    legend: Option<Legend>,
}

impl Canvas {
    /// Creates an empty canvas spanning `0..=width` by `0..=height` data units.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::Canvas`] if either extent is not a positive number.
    pub fn new(width: f32, height: f32) -> Result<Self, DiagramError> {
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(DiagramError::Canvas(format!(
                "canvas extent must be positive, got {width}x{height}"
            )));
        }
        Ok(Self {
            bounds: Bounds::new_from_points(Point::default(), Point::new(width, height)),
            shapes: Vec::new(),
            connectors: Vec::new(),
            guides: Vec::new(),
            labels: Vec::new(),
            legend: None,
        })
    }

    /// The canvas extent in data units.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Adds a box.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::Canvas`] if a corner lies outside the canvas,
    /// the size is not positive, or the border width or pad is negative.
    pub fn add_shape(&mut self, shape: Shape) -> Result<(), DiagramError> {
        let what = format!("shape `{}`", shape.component());
        let size = shape.size();
        if !(size.width() > 0.0 && size.height() > 0.0) {
            return Err(DiagramError::Canvas(format!("{what} must have a positive size")));
        }
        self.check_width(&what, shape.line_width())?;
        if let CornerStyle::Rounded { pad } = shape.corner() {
            if !(pad.is_finite() && pad >= 0.0) {
                return Err(DiagramError::Canvas(format!("{what} has an invalid pad {pad}")));
            }
        }
        let bounds = shape.bounds();
        self.check_point(&what, bounds.min_point())?;
        self.check_point(&what, Point::new(bounds.max_x(), bounds.max_y()))?;

        self.shapes.push(shape);
        Ok(())
    }

    /// Adds a connector.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::Canvas`] if an endpoint lies outside the
    /// canvas or the line width or mutation scale is negative.
    pub fn add_connector(&mut self, connector: Connector) -> Result<(), DiagramError> {
        let what = format!("connector #{}", self.connectors.len() + 1);
        self.check_point(&what, connector.start())?;
        self.check_point(&what, connector.end())?;
        self.check_width(&what, connector.line_width())?;
        self.check_width(&what, connector.mutation_scale())?;

        self.connectors.push(connector);
        Ok(())
    }

    /// Adds a guide line.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::Canvas`] if an endpoint lies outside the
    /// canvas or the line width is negative.
    pub fn add_guide(&mut self, guide: Guide) -> Result<(), DiagramError> {
        let what = format!("guide #{}", self.guides.len() + 1);
        self.check_point(&what, guide.start())?;
        self.check_point(&what, guide.end())?;
        self.check_width(&what, guide.line_width())?;

        self.guides.push(guide);
        Ok(())
    }

    /// Adds a label.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::Canvas`] if the anchor lies outside the
    /// canvas or the font size is zero.
    pub fn add_label(&mut self, label: Label) -> Result<(), DiagramError> {
        let what = format!("label `{}`", label.text());
        self.check_point(&what, label.position())?;
        if label.font_size() == 0 {
            return Err(DiagramError::Canvas(format!("{what} has a zero font size")));
        }

        self.labels.push(label);
        Ok(())
    }

    /// Sets the legend, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::Canvas`] if the legend has no columns or a
    /// zero font size.
    pub fn set_legend(&mut self, legend: Legend) -> Result<(), DiagramError> {
        if legend.columns() == 0 || legend.font_size() == 0 {
            return Err(DiagramError::Canvas(
                "legend needs at least one column and a non-zero font size".to_string(),
            ));
        }
        self.legend = Some(legend);
        Ok(())
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    pub fn guides(&self) -> &[Guide] {
        &self.guides
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn legend(&self) -> Option<&Legend> {
        self.legend.as_ref()
    }

    /// Number of distinct components the boxes are tagged with.
    pub fn component_count(&self) -> usize {
        self.shapes
            .iter()
            .map(Shape::component)
            .collect::<HashSet<_>>()
            .len()
    }

    fn check_point(&self, what: &str, point: Point) -> Result<(), DiagramError> {
        if point.x().is_finite() && point.y().is_finite() && self.bounds.contains(point) {
            Ok(())
        } else {
            Err(DiagramError::Canvas(format!(
                "{what} at ({}, {}) lies outside the canvas {}x{}",
                point.x(),
                point.y(),
                self.bounds.width(),
                self.bounds.height()
            )))
        }
    }

    fn check_width(&self, what: &str, width: f32) -> Result<(), DiagramError> {
        if width.is_finite() && width >= 0.0 {
            Ok(())
        } else {
            Err(DiagramError::Canvas(format!("{what} has an invalid width {width}")))
        }
    }
}
