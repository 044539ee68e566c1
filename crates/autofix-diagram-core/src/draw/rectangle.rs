//! Filled and stroked rectangles with optional rounded corners.

use std::rc::Rc;

use svg::node::element as svg_element;
use tiny_skia::{Path, PathBuilder};

use crate::{
    apply_stroke,
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition, Surface},
    geometry::{Bounds, Point, Size},
};

/// Control point distance for approximating a quarter circle with a cubic.
const BEZIER_K: f32 = 0.552_284_8;

/// Shared visual style of a rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct RectangleDefinition {
    fill_color: Option<Color>,
    stroke: StrokeDefinition,
    corner_radius: f32,
}

impl RectangleDefinition {
    pub fn new(fill_color: Option<Color>, stroke: StrokeDefinition) -> Self {
        Self {
            fill_color,
            stroke,
            corner_radius: 0.0,
        }
    }

    /// Sets the corner radius in points (builder style).
    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius.max(0.0);
        self
    }

    pub fn fill_color(&self) -> Option<Color> {
        self.fill_color
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }
}

impl Default for RectangleDefinition {
    fn default() -> Self {
        Self::new(None, StrokeDefinition::default())
    }
}

/// A rectangle of a given size sharing a [`RectangleDefinition`].
#[derive(Debug, Clone)]
pub struct Rectangle {
    definition: Rc<RectangleDefinition>,
    size: Size,
}

impl Rectangle {
    pub fn new(definition: Rc<RectangleDefinition>, size: Size) -> Self {
        Self { definition, size }
    }

    pub fn definition(&self) -> &RectangleDefinition {
        &self.definition
    }
}

impl Drawable for Rectangle {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let bounds = position.to_bounds(self.size);
        let definition = &self.definition;

        let mut rect = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height());
        if definition.corner_radius() > 0.0 {
            rect = rect.set("rx", definition.corner_radius());
        }
        rect = match definition.fill_color() {
            Some(fill) => rect.set("fill", fill.to_string()).set("fill-opacity", fill.alpha()),
            None => rect.set("fill", "none"),
        };
        let rect = apply_stroke!(rect, definition.stroke());

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Content, Box::new(rect));
        output
    }

    fn paint(&self, position: Point, surface: &mut Surface) {
        let bounds = position.to_bounds(self.size);
        let Some(path) = rounded_rect_path(bounds, self.definition.corner_radius()) else {
            return;
        };
        if let Some(fill) = self.definition.fill_color() {
            surface.fill_path(&path, fill);
        }
        surface.stroke_path(&path, self.definition.stroke());
    }

    fn size(&self) -> Size {
        self.size
    }
}

/// Builds a closed rectangle path with corners rounded by `radius`,
/// clamped to half the shorter side.
///
/// Returns `None` for degenerate bounds.
pub(crate) fn rounded_rect_path(bounds: Bounds, radius: f32) -> Option<Path> {
    if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
        return None;
    }
    let (x0, y0, x1, y1) = (bounds.min_x(), bounds.min_y(), bounds.max_x(), bounds.max_y());
    let r = radius.min(bounds.width() / 2.0).min(bounds.height() / 2.0).max(0.0);

    let mut pb = PathBuilder::new();
    if r <= 0.0 {
        pb.push_rect(tiny_skia::Rect::from_ltrb(x0, y0, x1, y1)?);
        return pb.finish();
    }

    let k = r * BEZIER_K;
    pb.move_to(x0 + r, y0);
    pb.line_to(x1 - r, y0);
    pb.cubic_to(x1 - r + k, y0, x1, y0 + r - k, x1, y0 + r);
    pb.line_to(x1, y1 - r);
    pb.cubic_to(x1, y1 - r + k, x1 - r + k, y1, x1 - r, y1);
    pb.line_to(x0 + r, y1);
    pb.cubic_to(x0 + r - k, y1, x0, y1 - r + k, x0, y1 - r);
    pb.line_to(x0, y0 + r);
    pb.cubic_to(x0, y0 + r - k, x0 + r - k, y0, x0 + r, y0);
    pb.close();
    pb.finish()
}
