//! Legend layout.
//!
//! Lengths are multiples of the legend font size. Entries fill columns
//! top to bottom, left to right; the first `len % columns` columns take
//! one extra row.

use std::rc::Rc;

use autofix_diagram_core::{
    color::Color,
    draw::{
        Arrow, ArrowDefinition, ArrowDirection, Drawable, HorizontalAlign, LayeredOutput,
        PositionedDrawable, Rectangle, RectangleDefinition, RenderLayer, StrokeDefinition, Surface,
        Text, TextAlign, TextDefinition, VerticalAlign,
    },
    geometry::{Bounds, Point, Size},
};

use super::FigureLabel;
use crate::canvas::{Legend, LegendHandle};

const BORDER_PAD: f32 = 0.4;
const LABEL_SPACING: f32 = 0.5;
const HANDLE_LENGTH: f32 = 2.0;
const HANDLE_HEIGHT: f32 = 0.7;
const HANDLE_TEXT_PAD: f32 = 0.8;
const COLUMN_SPACING: f32 = 2.0;
const BORDER_AXES_PAD: f32 = 0.5;
const FRAME_RADIUS: f32 = 0.2;
const FRAME_ALPHA: f32 = 0.8;
const FRAME_EDGE: &str = "#CCCCCC";

/// A legend placed on the figure: a frame, one handle per entry and the labels.
#[derive(Debug)]
pub struct LegendLayout {
    frame: PositionedDrawable<Rectangle>,
    handles: Vec<PositionedDrawable<Box<dyn Drawable>>>,
    labels: Vec<FigureLabel>,
}

impl LegendLayout {
    /// Lays out `legend` at the lower center of `figure`.
    pub fn new(legend: &Legend, figure: Bounds) -> Self {
        let em = f32::from(legend.font_size());
        let mut definition = TextDefinition::new();
        definition.set_font_size(legend.font_size());

        let entries = legend.entries();
        let label_sizes: Vec<Size> = entries
            .iter()
            .map(|entry| Text::new(&definition, &entry.label).metrics().size)
            .collect();

        let handle = Size::new(HANDLE_LENGTH * em, HANDLE_HEIGHT * em);
        let row_height = label_sizes
            .iter()
            .map(|size| size.height())
            .fold(handle.height(), f32::max);

        let columns = column_rows(entries.len(), legend.columns());
        let mut column_widths = Vec::with_capacity(columns.len());
        let mut first = 0;
        for rows in &columns {
            let widest = label_sizes[first..first + rows]
                .iter()
                .map(|size| size.width())
                .fold(0.0, f32::max);
            column_widths.push(handle.width() + HANDLE_TEXT_PAD * em + widest);
            first += rows;
        }

        let max_rows = columns.first().copied().unwrap_or(0);
        let content = Size::new(
            column_widths.iter().sum::<f32>()
                + COLUMN_SPACING * em * column_widths.len().saturating_sub(1) as f32,
            row_height * max_rows as f32 + LABEL_SPACING * em * max_rows.saturating_sub(1) as f32,
        );
        let frame_size = Size::new(
            content.width() + 2.0 * BORDER_PAD * em,
            content.height() + 2.0 * BORDER_PAD * em,
        );
        let frame_bounds = Bounds::new_from_center(
            Point::new(
                figure.center().x(),
                figure.max_y() - BORDER_AXES_PAD * em - frame_size.height() / 2.0,
            ),
            frame_size,
        );

        let frame_definition = RectangleDefinition::new(
            Some(named_color("white").with_alpha(FRAME_ALPHA)),
            StrokeDefinition::solid(named_color(FRAME_EDGE), 1.0),
        )
        .with_corner_radius(FRAME_RADIUS * em);
        let frame = PositionedDrawable::new(Rectangle::new(Rc::new(frame_definition), frame_size))
            .with_position(frame_bounds.center());

        let mut handles = Vec::with_capacity(entries.len());
        let mut labels = Vec::with_capacity(entries.len());
        let origin = frame_bounds
            .min_point()
            .add_point(Point::new(BORDER_PAD * em, BORDER_PAD * em));
        let align = TextAlign::new(HorizontalAlign::Left, VerticalAlign::Center);

        let mut entry_iter = entries.iter();
        let mut x0 = origin.x();
        for (rows, width) in columns.iter().zip(&column_widths) {
            for row in 0..*rows {
                let Some(entry) = entry_iter.next() else {
                    break;
                };
                let y = origin.y()
                    + row as f32 * (row_height + LABEL_SPACING * em)
                    + row_height / 2.0;

                handles.push(layout_handle(&entry.handle, Point::new(x0, y), handle));
                labels.push(FigureLabel::new(
                    definition.clone(),
                    entry.label.clone(),
                    align,
                    Point::new(x0 + handle.width() + HANDLE_TEXT_PAD * em, y),
                ));
            }
            x0 += width + COLUMN_SPACING * em;
        }

        Self {
            frame,
            handles,
            labels,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.frame.bounds()
    }

    pub fn handles(&self) -> &[PositionedDrawable<Box<dyn Drawable>>] {
        &self.handles
    }

    pub fn labels(&self) -> &[FigureLabel] {
        &self.labels
    }

    /// Renders the frame, handles and labels onto the legend layer.
    pub fn render_to_layers(&self) -> LayeredOutput {
        let mut output = self.frame.render_to_layers();
        for handle in &self.handles {
            output.merge(handle.render_to_layers());
        }
        for label in &self.labels {
            output.merge(label.text().render_to_layers());
        }
        output.into_layer(RenderLayer::Legend).into_classed("legend")
    }

    pub fn paint(&self, surface: &mut Surface) {
        self.frame.paint(surface);
        for handle in &self.handles {
            handle.paint(surface);
        }
        for label in &self.labels {
            label.text().paint(surface);
        }
    }
}

/// Rows in each column for `count` entries spread over `columns` columns.
fn column_rows(count: usize, columns: usize) -> Vec<usize> {
    let columns = columns.clamp(1, count.max(1));
    let rows = count / columns;
    let large = count % columns;
    (0..columns)
        .map(|column| if column < large { rows + 1 } else { rows })
        .filter(|rows| *rows > 0)
        .collect()
}

fn named_color(name: &str) -> Color {
    Color::new(name).unwrap_or_default()
}

/// Places a handle with its left edge at `left` (x) and centered on its y.
fn layout_handle(
    handle: &LegendHandle,
    left: Point,
    size: Size,
) -> PositionedDrawable<Box<dyn Drawable>> {
    let center = Point::new(left.x() + size.width() / 2.0, left.y());
    match handle {
        LegendHandle::Patch { fill, edge } => {
            let definition =
                RectangleDefinition::new(Some(*fill), StrokeDefinition::solid(*edge, 1.0));
            let rectangle = Rectangle::new(Rc::new(definition), size);
            PositionedDrawable::new(Box::new(rectangle) as Box<dyn Drawable>).with_position(center)
        }
        LegendHandle::Line {
            color,
            style,
            width,
        } => {
            let mut stroke = StrokeDefinition::new(*color, *width);
            stroke.set_style(style.clone());
            let arrow = Arrow::between(
                Rc::new(ArrowDefinition::new(Rc::new(stroke))),
                ArrowDirection::Plain,
                Point::new(left.x(), left.y()),
                Point::new(left.x() + size.width(), left.y()),
            );
            PositionedDrawable::new(Box::new(arrow.inner().clone()) as Box<dyn Drawable>)
                .with_position(arrow.position())
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::canvas::LegendEntry;

    fn figure() -> Bounds {
        Bounds::new_from_top_left(Point::default(), Size::new(1008.0, 720.0))
    }

    fn legend(count: usize) -> Legend {
        let entries = (0..count)
            .map(|i| LegendEntry::patch(format!("Entry {i}"), Color::default(), Color::default()))
            .collect();
        Legend::new(entries, 3, 8)
    }

    #[test]
    fn test_column_rows() {
        assert_eq!(column_rows(6, 3), vec![2, 2, 2]);
        assert_eq!(column_rows(5, 3), vec![2, 2, 1]);
        assert_eq!(column_rows(4, 3), vec![2, 1, 1]);
        assert_eq!(column_rows(2, 3), vec![1, 1]);
        assert_eq!(column_rows(0, 3), Vec::<usize>::new());
        assert_eq!(column_rows(3, 0), vec![3]);
    }

    #[test]
    fn test_legend_sits_at_lower_center() {
        let layout = LegendLayout::new(&legend(6), figure());
        let bounds = layout.bounds();

        assert_approx_eq!(f32, bounds.center().x(), 504.0, epsilon = 0.001);
        assert_approx_eq!(f32, bounds.max_y(), 720.0 - 4.0, epsilon = 0.001);
    }

    #[test]
    fn test_entries_fill_columns_first() {
        let layout = LegendLayout::new(&legend(6), figure());
        let handles = layout.handles();
        assert_eq!(handles.len(), 6);

        // Entries 0 and 1 share the first column
        assert_approx_eq!(f32, handles[0].position().x(), handles[1].position().x());
        assert!(handles[1].position().y() > handles[0].position().y());
        // Entry 2 starts the second column on the first row
        assert!(handles[2].position().x() > handles[0].position().x());
        assert_approx_eq!(f32, handles[2].position().y(), handles[0].position().y());
    }

    #[test]
    fn test_handles_stay_inside_frame() {
        let layout = LegendLayout::new(&legend(6), figure());
        let frame = layout.bounds();
        for handle in layout.handles() {
            let bounds = handle.bounds();
            assert!(frame.contains(bounds.min_point()));
            assert!(frame.contains(Point::new(bounds.max_x(), bounds.max_y())));
        }
        assert_eq!(layout.labels().len(), 6);
    }

    #[test]
    fn test_patch_handle_size() {
        let layout = LegendLayout::new(&legend(1), figure());
        let bounds = layout.handles()[0].bounds();
        assert_approx_eq!(f32, bounds.width(), 16.0);
        assert_approx_eq!(f32, bounds.height(), 5.6, epsilon = 0.001);
    }

    #[test]
    fn test_render_is_on_legend_layer() {
        let layout = LegendLayout::new(&legend(2), figure());
        let nodes = layout.render_to_layers().render();
        assert_eq!(nodes.len(), 1);

        let svg = nodes[0].to_string();
        assert!(svg.contains(r#"data-layer="legend""#));
        // Frame, two handles, two labels
        assert_eq!(svg.matches(r#"class="legend""#).count(), 5);
    }
}
