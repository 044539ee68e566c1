//! Straight arrows with open "V" heads.
//!
//! An [`Arrow`] is a straight segment between two points with an optional
//! head at either end. Its [`ArrowDefinition`] holds the stroke, the head
//! geometry and how far both ends are pulled back from the given points.

use std::{fmt, rc::Rc};

use svg::node::element as svg_element;
use tiny_skia::PathBuilder;

use crate::{
    apply_stroke,
    draw::{Drawable, LayeredOutput, PositionedDrawable, RenderLayer, StrokeDefinition, Surface},
    geometry::{Point, Size},
};

/// Geometry of an open arrowhead, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowHead {
    /// Distance from the tip back to the head's base.
    pub length: f32,
    /// Distance from the shaft to each barb end.
    pub half_width: f32,
}

impl ArrowHead {
    /// Head sized from a mutation scale: length 0.4 and half-width 0.2
    /// times the scale.
    ///
    /// ```
    /// # use autofix_diagram_core::draw::ArrowHead;
    /// let head = ArrowHead::from_mutation_scale(20.0);
    /// assert_eq!(head.length, 8.0);
    /// assert_eq!(head.half_width, 4.0);
    /// ```
    pub fn from_mutation_scale(scale: f32) -> Self {
        Self {
            length: 0.4 * scale,
            half_width: 0.2 * scale,
        }
    }
}

impl Default for ArrowHead {
    fn default() -> Self {
        Self::from_mutation_scale(10.0)
    }
}

/// Defines the visual properties of an arrow.
#[derive(Debug, Clone)]
pub struct ArrowDefinition {
    stroke: Rc<StrokeDefinition>,
    head: ArrowHead,
    shrink: f32,
}

impl ArrowDefinition {
    /// Creates a definition with the given stroke, a default head and no shrink.
    pub fn new(stroke: Rc<StrokeDefinition>) -> Self {
        Self {
            stroke,
            head: ArrowHead::default(),
            shrink: 0.0,
        }
    }

    pub fn stroke(&self) -> &Rc<StrokeDefinition> {
        &self.stroke
    }

    pub fn head(&self) -> ArrowHead {
        self.head
    }

    /// Distance each end is pulled back from its endpoint, in points.
    pub fn shrink(&self) -> f32 {
        self.shrink
    }

    pub fn set_head(&mut self, head: ArrowHead) {
        self.head = head;
    }

    pub fn set_shrink(&mut self, shrink: f32) {
        self.shrink = shrink.max(0.0);
    }
}

impl Default for ArrowDefinition {
    fn default() -> Self {
        Self::new(Rc::new(StrokeDefinition::default()))
    }
}

/// Defines the direction of arrow markers.
///
/// - `Forward`: `->`, head at the destination
/// - `Backward`: `<-`, head at the source
/// - `Bidirectional`: `<->`, heads at both ends
/// - `Plain`: `-`, no heads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowDirection {
    Forward,       // ->
    Backward,      // <-
    Bidirectional, // <->
    Plain,         // -
}

impl ArrowDirection {
    fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "->",
            Self::Backward => "<-",
            Self::Bidirectional => "<->",
            Self::Plain => "-",
        }
    }

    fn head_at_source(self) -> bool {
        matches!(self, Self::Backward | Self::Bidirectional)
    }

    fn head_at_destination(self) -> bool {
        matches!(self, Self::Forward | Self::Bidirectional)
    }
}

impl fmt::Display for ArrowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A drawable straight arrow.
///
/// The endpoints are stored relative to the arrow's center so the arrow
/// fits the center-positioned [`Drawable`] model; use [`Arrow::between`]
/// to place one between two absolute points.
#[derive(Debug, Clone)]
pub struct Arrow {
    definition: Rc<ArrowDefinition>,
    direction: ArrowDirection,
    source_offset: Point,
    destination_offset: Point,
}

impl Arrow {
    /// Creates an arrow from `source` to `destination`, positioned at their midpoint.
    ///
    /// ```
    /// # use std::rc::Rc;
    /// # use autofix_diagram_core::draw::{Arrow, ArrowDefinition, ArrowDirection};
    /// # use autofix_diagram_core::geometry::Point;
    /// let arrow = Arrow::between(
    ///     Rc::new(ArrowDefinition::default()),
    ///     ArrowDirection::Forward,
    ///     Point::new(0.0, 0.0),
    ///     Point::new(100.0, 0.0),
    /// );
    /// assert_eq!(arrow.position(), Point::new(50.0, 0.0));
    /// ```
    pub fn between(
        definition: Rc<ArrowDefinition>,
        direction: ArrowDirection,
        source: Point,
        destination: Point,
    ) -> PositionedDrawable<Self> {
        let center = source.midpoint(destination);
        let arrow = Self {
            definition,
            direction,
            source_offset: source.sub_point(center),
            destination_offset: destination.sub_point(center),
        };
        PositionedDrawable::new(arrow).with_position(center)
    }

    pub fn definition(&self) -> &ArrowDefinition {
        &self.definition
    }

    pub fn direction(&self) -> ArrowDirection {
        self.direction
    }

    /// Endpoints after shrinking. Segments shorter than twice the shrink
    /// are left as is.
    fn shrunk_endpoints(&self, position: Point) -> (Point, Point) {
        let source = position.add_point(self.source_offset);
        let destination = position.add_point(self.destination_offset);
        let shrink = self.definition.shrink();

        let delta = destination.sub_point(source);
        match delta.normalize() {
            Some(unit) if delta.hypot() > 2.0 * shrink => (
                source.add_point(unit.scale(shrink)),
                destination.sub_point(unit.scale(shrink)),
            ),
            _ => (source, destination),
        }
    }

    /// The shaft and heads as open polylines in absolute coordinates.
    fn polylines(&self, position: Point) -> Vec<Vec<Point>> {
        let (start, end) = self.shrunk_endpoints(position);
        let mut lines = vec![vec![start, end]];

        let Some(unit) = end.sub_point(start).normalize() else {
            return lines;
        };
        let head = self.definition.head();
        let barb = unit.perpendicular().scale(head.half_width);

        if self.direction.head_at_destination() {
            let base = end.sub_point(unit.scale(head.length));
            lines.push(vec![base.add_point(barb), end, base.sub_point(barb)]);
        }
        if self.direction.head_at_source() {
            let base = start.add_point(unit.scale(head.length));
            lines.push(vec![base.add_point(barb), start, base.sub_point(barb)]);
        }

        lines
    }

    fn path_data(&self, position: Point) -> String {
        let mut data = Vec::new();
        for line in self.polylines(position) {
            for (index, point) in line.iter().enumerate() {
                let command = if index == 0 { "M" } else { "L" };
                data.push(format!("{command} {} {}", point.x(), point.y()));
            }
        }
        data.join(" ")
    }
}

impl Drawable for Arrow {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let path = svg_element::Path::new()
            .set("d", self.path_data(position))
            .set("fill", "none");
        let path = apply_stroke!(path, self.definition.stroke());

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Arrow, Box::new(path));
        output
    }

    fn paint(&self, position: Point, surface: &mut Surface) {
        let mut pb = PathBuilder::new();
        for line in self.polylines(position) {
            let mut points = line.into_iter();
            let Some(first) = points.next() else {
                continue;
            };
            pb.move_to(first.x(), first.y());
            for point in points {
                pb.line_to(point.x(), point.y());
            }
        }
        if let Some(path) = pb.finish() {
            surface.stroke_path(&path, self.definition.stroke());
        }
    }

    fn size(&self) -> Size {
        let extent = self
            .polylines(Point::default())
            .into_iter()
            .flatten()
            .fold(Point::default(), |acc, point| {
                let point = point.abs();
                Point::new(acc.x().max(point.x()), acc.y().max(point.y()))
            });
        Size::new(extent.x() * 2.0, extent.y() * 2.0)
    }
}
