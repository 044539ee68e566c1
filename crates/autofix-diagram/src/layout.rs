//! Figure layout.
//!
//! Turns a [`Canvas`] in data units into a [`Figure`] in points: every
//! primitive is projected onto the figure, text is measured, the legend is
//! laid out and the tight bounds of everything drawn are computed. Both
//! exporters draw the same [`Figure`].
//!
//! # Coordinates
//!
//! The canvas range maps onto the full figure with y flipped to screen
//! orientation. The two axes scale independently, so the 0..10 by 0..10
//! canvas on a 14 by 10 inch figure gives 100.8 points per unit
//! horizontally and 72 vertically.

mod legend;

pub use legend::LegendLayout;

use std::rc::Rc;

use log::debug;

use autofix_diagram_core::{
    color::Color,
    draw::{
        Arrow, ArrowDefinition, ArrowDirection, ArrowHead, LayeredOutput, PositionedDrawable,
        Rectangle, RectangleDefinition, StrokeDefinition, StrokeJoin, StrokeStyle, Surface, Text,
        TextAlign, TextDefinition,
    },
    geometry::{Bounds, Insets, Point, Size},
};

use crate::{
    DiagramError,
    canvas::{Canvas, Connector, CornerStyle, Guide, Label, Shape},
    config::{AppConfig, POINTS_PER_INCH},
};

/// Distance both ends of a connector are pulled back from its endpoints, in points.
const CONNECTOR_SHRINK: f32 = 2.0;

/// Maps canvas data units onto figure points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    data: Bounds,
    figure: Size,
}

impl Projection {
    /// Creates a projection of the `data` range onto a figure of `figure` points.
    pub fn new(data: Bounds, figure: Size) -> Self {
        Self { data, figure }
    }

    /// Points per data unit along x.
    pub fn scale_x(&self) -> f32 {
        self.figure.width() / self.data.width()
    }

    /// Points per data unit along y.
    pub fn scale_y(&self) -> f32 {
        self.figure.height() / self.data.height()
    }

    /// Projects a data point (y up) to a figure point (y down).
    ///
    /// ```
    /// # use autofix_diagram::layout::Projection;
    /// # use autofix_diagram_core::geometry::{Bounds, Point, Size};
    /// let data = Bounds::new_from_points(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
    /// let projection = Projection::new(data, Size::new(1008.0, 720.0));
    ///
    /// assert_eq!(projection.project(Point::new(0.0, 10.0)), Point::new(0.0, 0.0));
    /// assert_eq!(projection.project(Point::new(5.0, 0.0)), Point::new(504.0, 720.0));
    /// ```
    pub fn project(&self, point: Point) -> Point {
        Point::new(
            (point.x() - self.data.min_x()) * self.scale_x(),
            (self.data.max_y() - point.y()) * self.scale_y(),
        )
    }

    /// Projects data bounds to figure bounds.
    pub fn project_bounds(&self, bounds: Bounds) -> Bounds {
        Bounds::new_from_points(
            self.project(bounds.min_point()),
            self.project(Point::new(bounds.max_x(), bounds.max_y())),
        )
    }

    /// The figure extent in points.
    pub fn figure_bounds(&self) -> Bounds {
        Bounds::new_from_top_left(Point::default(), self.figure)
    }
}

/// A measured label placed on the figure.
///
/// The label owns its style and content; [`FigureLabel::text`] borrows them
/// into a drawable [`Text`].
#[derive(Debug, Clone)]
pub struct FigureLabel {
    definition: TextDefinition,
    content: String,
    align: TextAlign,
    center: Point,
}

impl FigureLabel {
    /// Measures the text and places it against `anchor` with `align`.
    pub fn new(
        definition: TextDefinition,
        content: String,
        align: TextAlign,
        anchor: Point,
    ) -> Self {
        let center = Text::new(&definition, &content)
            .with_align(align)
            .anchored_center(anchor);
        Self {
            definition,
            content,
            align,
            center,
        }
    }

    /// The drawable text at its figure position.
    pub fn text(&self) -> PositionedDrawable<Text<'_>> {
        PositionedDrawable::new(Text::new(&self.definition, &self.content).with_align(self.align))
            .with_position(self.center)
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Center of the padded text box.
    pub fn center(&self) -> Point {
        self.center
    }

    pub fn bounds(&self) -> Bounds {
        self.text().bounds()
    }
}

/// A canvas laid out in figure points, ready to export.
#[derive(Debug)]
pub struct Figure {
    size: Size,
    background: Color,
    boxes: Vec<PositionedDrawable<Rectangle>>,
    connectors: Vec<PositionedDrawable<Arrow>>,
    guides: Vec<PositionedDrawable<Arrow>>,
    labels: Vec<FigureLabel>,
    legend: Option<LegendLayout>,
    bounds: Bounds,
}

impl Figure {
    /// Lays out `canvas` on a figure sized by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::Config`] if the configuration is invalid.
    pub fn from_canvas(canvas: &Canvas, config: &AppConfig) -> Result<Self, DiagramError> {
        config.validate().map_err(DiagramError::Config)?;

        let size = Size::new(
            config.figure().width() * POINTS_PER_INCH,
            config.figure().height() * POINTS_PER_INCH,
        );
        let background = config.style().background_color().map_err(DiagramError::Config)?;
        let projection = Projection::new(canvas.bounds(), size);

        let boxes = canvas
            .shapes()
            .iter()
            .map(|shape| layout_shape(shape, &projection))
            .collect();
        let connectors = canvas
            .connectors()
            .iter()
            .map(|connector| layout_connector(connector, &projection))
            .collect();
        let guides = canvas
            .guides()
            .iter()
            .map(|guide| layout_guide(guide, &projection))
            .collect();
        let labels = canvas
            .labels()
            .iter()
            .map(|label| layout_label(label, &projection))
            .collect();
        let legend = canvas
            .legend()
            .map(|legend| LegendLayout::new(legend, projection.figure_bounds()));

        let mut figure = Self {
            size,
            background,
            boxes,
            connectors,
            guides,
            labels,
            legend,
            bounds: Bounds::default(),
        };

        let padding = config.output().padding() * POINTS_PER_INCH;
        figure.bounds = figure
            .content_bounds()
            .unwrap_or_else(|| projection.figure_bounds())
            .add_padding(Insets::uniform(padding));

        debug!(
            width = figure.bounds.width(),
            height = figure.bounds.height();
            "Figure laid out"
        );

        Ok(figure)
    }

    /// The full figure size in points.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Tight bounds of everything drawn, plus the configured padding.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn boxes(&self) -> &[PositionedDrawable<Rectangle>] {
        &self.boxes
    }

    pub fn connectors(&self) -> &[PositionedDrawable<Arrow>] {
        &self.connectors
    }

    pub fn guides(&self) -> &[PositionedDrawable<Arrow>] {
        &self.guides
    }

    pub fn labels(&self) -> &[FigureLabel] {
        &self.labels
    }

    pub fn legend(&self) -> Option<&LegendLayout> {
        self.legend.as_ref()
    }

    /// Renders every element to layered SVG nodes, tagging boxes,
    /// connectors and guides with their class.
    pub fn render_to_layers(&self) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        for rectangle in &self.boxes {
            output.merge(rectangle.render_to_layers().into_classed("box"));
        }
        for arrow in &self.connectors {
            output.merge(arrow.render_to_layers().into_classed("connector"));
        }
        for guide in &self.guides {
            output.merge(guide.render_to_layers().into_classed("guide"));
        }
        for label in &self.labels {
            output.merge(label.text().render_to_layers().into_classed("label"));
        }
        if let Some(legend) = &self.legend {
            output.merge(legend.render_to_layers());
        }
        output
    }

    /// Paints every element onto `surface`: boxes, connectors, guides,
    /// labels, then the legend.
    pub fn paint(&self, surface: &mut Surface) {
        for rectangle in &self.boxes {
            rectangle.paint(surface);
        }
        for arrow in &self.connectors {
            arrow.paint(surface);
        }
        for guide in &self.guides {
            guide.paint(surface);
        }
        for label in &self.labels {
            label.text().paint(surface);
        }
        if let Some(legend) = &self.legend {
            legend.paint(surface);
        }
    }

    /// Union of the bounds of every element, strokes included.
    fn content_bounds(&self) -> Option<Bounds> {
        let stroked = |bounds: Bounds, width: f32| bounds.add_padding(Insets::uniform(width / 2.0));

        self.boxes
            .iter()
            .map(|rectangle| {
                stroked(rectangle.bounds(), rectangle.inner().definition().stroke().width())
            })
            .chain(
                self.connectors
                    .iter()
                    .chain(&self.guides)
                    .map(|arrow| {
                        stroked(arrow.bounds(), arrow.inner().definition().stroke().width())
                    }),
            )
            .chain(self.labels.iter().map(FigureLabel::bounds))
            .chain(self.legend.iter().map(LegendLayout::bounds))
            .reduce(|acc, bounds| acc.merge(&bounds))
    }
}

fn layout_shape(shape: &Shape, projection: &Projection) -> PositionedDrawable<Rectangle> {
    let (data_bounds, radius) = match shape.corner() {
        CornerStyle::Square => (shape.bounds(), 0.0),
        CornerStyle::Rounded { pad } => (
            shape.bounds().add_padding(Insets::uniform(pad)),
            (pad * projection.scale_x()).min(pad * projection.scale_y()),
        ),
    };
    let bounds = projection.project_bounds(data_bounds);

    let mut stroke = StrokeDefinition::new(shape.edge_color(), shape.line_width());
    stroke.set_style(shape.line_style().clone());
    let definition =
        RectangleDefinition::new(Some(shape.fill_color()), stroke).with_corner_radius(radius);

    PositionedDrawable::new(Rectangle::new(Rc::new(definition), bounds.to_size()))
        .with_position(bounds.center())
}

fn line_stroke(color: Color, width: f32, style: &StrokeStyle) -> StrokeDefinition {
    let mut stroke = StrokeDefinition::new(color, width);
    stroke.set_style(style.clone());
    stroke
}

fn layout_connector(connector: &Connector, projection: &Projection) -> PositionedDrawable<Arrow> {
    let mut stroke = line_stroke(connector.color(), connector.line_width(), connector.line_style());
    stroke.set_join(StrokeJoin::Round);

    let mut definition = ArrowDefinition::new(Rc::new(stroke));
    definition.set_head(ArrowHead::from_mutation_scale(connector.mutation_scale()));
    definition.set_shrink(CONNECTOR_SHRINK);

    Arrow::between(
        Rc::new(definition),
        connector.direction(),
        projection.project(connector.start()),
        projection.project(connector.end()),
    )
}

fn layout_guide(guide: &Guide, projection: &Projection) -> PositionedDrawable<Arrow> {
    let stroke = line_stroke(guide.color(), guide.line_width(), guide.line_style());
    Arrow::between(
        Rc::new(ArrowDefinition::new(Rc::new(stroke))),
        ArrowDirection::Plain,
        projection.project(guide.start()),
        projection.project(guide.end()),
    )
}

fn layout_label(label: &Label, projection: &Projection) -> FigureLabel {
    let mut definition = TextDefinition::new();
    definition.set_font_size(label.font_size());
    definition.set_weight(label.weight());
    definition.set_style(label.style());
    definition.set_color(label.color());

    if let Some(background) = label.background() {
        definition.set_background_color(Some(background.fill));
        definition.set_background_stroke(Some(StrokeDefinition::solid(background.edge, 1.0)));
        definition.set_padding(Insets::uniform(
            background.pad * f32::from(label.font_size()),
        ));
    }

    FigureLabel::new(
        definition,
        label.text().to_string(),
        label.align(),
        projection.project(label.position()),
    )
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::architecture;

    fn projection() -> Projection {
        let data = Bounds::new_from_points(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        Projection::new(data, Size::new(1008.0, 720.0))
    }

    fn figure() -> Figure {
        Figure::from_canvas(&architecture::build().unwrap(), &AppConfig::default()).unwrap()
    }

    #[test]
    fn test_projection_scales() {
        let projection = projection();
        assert_approx_eq!(f32, projection.scale_x(), 100.8);
        assert_approx_eq!(f32, projection.scale_y(), 72.0);
    }

    #[test]
    fn test_project_bounds_flips_y() {
        let data = Bounds::new_from_points(Point::new(0.5, 7.5), Point::new(2.5, 8.5));
        let bounds = projection().project_bounds(data);

        assert_approx_eq!(f32, bounds.min_x(), 50.4, epsilon = 0.001);
        assert_approx_eq!(f32, bounds.max_x(), 252.0, epsilon = 0.001);
        assert_approx_eq!(f32, bounds.min_y(), 108.0, epsilon = 0.001);
        assert_approx_eq!(f32, bounds.max_y(), 180.0, epsilon = 0.001);
    }

    #[test]
    fn test_rounded_box_grows_by_pad() {
        let figure = figure();
        let sentry = figure.boxes()[0].bounds();

        // (0.5, 7.5) 2x1 with a 0.1 pad
        assert_approx_eq!(f32, sentry.min_x(), 40.32, epsilon = 0.01);
        assert_approx_eq!(f32, sentry.width(), 2.2 * 100.8, epsilon = 0.01);
        assert_approx_eq!(f32, sentry.height(), 1.2 * 72.0, epsilon = 0.01);
        assert_approx_eq!(
            f32,
            figure.boxes()[0].inner().definition().corner_radius(),
            7.2,
            epsilon = 0.001
        );
    }

    #[test]
    fn test_figure_counts_follow_canvas() {
        let figure = figure();
        assert_eq!(figure.boxes().len(), architecture::BOX_COUNT);
        assert_eq!(figure.connectors().len(), architecture::CONNECTOR_COUNT);
        assert_eq!(figure.guides().len(), architecture::GUIDE_COUNT);
        assert_eq!(figure.labels().len(), architecture::LABEL_COUNT);
        assert!(figure.legend().is_some());
    }

    #[test]
    fn test_tight_bounds_cover_every_element() {
        let figure = figure();
        let bounds = figure.bounds();
        let covers = |inner: Bounds| {
            bounds.contains(inner.min_point())
                && bounds.contains(Point::new(inner.max_x(), inner.max_y()))
        };

        assert!(figure.boxes().iter().all(|b| covers(b.bounds())));
        assert!(figure.connectors().iter().all(|c| covers(c.bounds())));
        assert!(figure.guides().iter().all(|g| covers(g.bounds())));
        assert!(figure.labels().iter().all(|l| covers(l.bounds())));
        assert!(figure.legend().is_some_and(|legend| covers(legend.bounds())));
    }

    #[test]
    fn test_tight_bounds_are_padded() {
        let canvas = architecture::build().unwrap();
        let tight = Figure::from_canvas(&canvas, &AppConfig::default()).unwrap();

        let unpadded_config: AppConfig = toml::from_str("[output]\npadding = 0.0").unwrap();
        let unpadded = Figure::from_canvas(&canvas, &unpadded_config).unwrap();

        assert_approx_eq!(
            f32,
            tight.bounds().width() - unpadded.bounds().width(),
            14.4,
            epsilon = 0.01
        );
        assert_approx_eq!(
            f32,
            tight.bounds().min_x(),
            unpadded.bounds().min_x() - 7.2,
            epsilon = 0.01
        );
    }

    #[test]
    fn test_empty_canvas_uses_figure_bounds() {
        let canvas = Canvas::new(10.0, 10.0).unwrap();
        let figure = Figure::from_canvas(&canvas, &AppConfig::default()).unwrap();
        assert_approx_eq!(f32, figure.bounds().width(), 1008.0 + 14.4, epsilon = 0.01);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let canvas = architecture::build().unwrap();
        let config: AppConfig = toml::from_str("[figure]\nwidth = 0.0").unwrap();
        let err = Figure::from_canvas(&canvas, &config).unwrap_err();
        assert!(matches!(err, DiagramError::Config(_)));
    }

    #[test]
    fn test_connector_shrink_and_heads() {
        let figure = figure();
        // Sentry.io -> SentryClient, vertical, 36pt long
        let arrow = &figure.connectors()[0];
        let definition = arrow.inner().definition();
        assert_approx_eq!(f32, definition.shrink(), 2.0);
        assert_approx_eq!(f32, definition.head().length, 8.0);
        assert_approx_eq!(f32, arrow.bounds().height(), 32.0, epsilon = 0.001);
    }

    #[test]
    fn test_render_tags_elements() {
        let svg: String = figure()
            .render_to_layers()
            .render()
            .iter()
            .map(|node| node.to_string())
            .collect();

        assert_eq!(svg.matches(r#"class="box""#).count(), architecture::BOX_COUNT);
        assert_eq!(
            svg.matches(r#"class="connector""#).count(),
            architecture::CONNECTOR_COUNT
        );
        assert_eq!(svg.matches(r#"class="guide""#).count(), architecture::GUIDE_COUNT);
    }

    proptest! {
        #[test]
        fn prop_projection_stays_on_figure(x in 0.0f32..=10.0, y in 0.0f32..=10.0) {
            let projection = projection();
            let point = projection.project(Point::new(x, y));
            prop_assert!(point.x() >= -0.001 && point.x() <= 1008.001);
            prop_assert!(point.y() >= -0.001 && point.y() <= 720.001);
        }

        #[test]
        fn prop_projection_preserves_order(a in 0.0f32..10.0, b in 0.0f32..10.0) {
            let projection = projection();
            let pa = projection.project(Point::new(a, a));
            let pb = projection.project(Point::new(b, b));
            if a < b {
                prop_assert!(pa.x() <= pb.x());
                prop_assert!(pa.y() >= pb.y());
            }
        }
    }
}
