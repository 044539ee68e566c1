//! Drawable Components for Diagram Rendering
//!
//! This module provides drawable abstractions for every visual primitive of
//! the diagram. All drawable components implement the [`Drawable`] trait,
//! which provides a consistent interface for rendering to layered SVG output,
//! painting onto a raster [`Surface`], and calculating size.
//!
//! # Layer-Based Rendering
//!
//! Drawables render to one or more [`RenderLayer`]s, which are automatically
//! ordered during final SVG generation. Raster painting happens in the order
//! the caller paints drawables.

mod arrow;
mod layer;
mod positioned;
mod raster;
mod rectangle;
mod stroke;
mod text;

pub use arrow::{Arrow, ArrowDefinition, ArrowDirection, ArrowHead};
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use positioned::PositionedDrawable;
pub use raster::{MAX_SURFACE_DIMENSION, RasterError, Surface};
pub use rectangle::{Rectangle, RectangleDefinition};
pub use stroke::{StrokeCap, StrokeDefinition, StrokeJoin, StrokeStyle};
pub use text::{
    FontStyle, FontWeight, HorizontalAlign, Text, TextAlign, TextDefinition, TextMetrics,
    VerticalAlign,
};

use crate::geometry::{Point, Size};

/// Trait for drawable diagram elements.
pub trait Drawable: std::fmt::Debug {
    /// Renders this drawable to one or more SVG layers.
    ///
    /// Simple drawables typically emit to a single layer, while complex
    /// drawables can emit different elements to different layers for proper
    /// z-ordering.
    ///
    /// # Arguments
    ///
    /// * `position` - The center position where this drawable should be rendered
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// Paints this drawable onto a raster surface.
    ///
    /// # Arguments
    ///
    /// * `position` - The center position where this drawable should be painted
    /// * `surface` - The destination surface, in figure coordinates
    fn paint(&self, position: Point, surface: &mut Surface);

    /// Returns the size of this drawable.
    fn size(&self) -> Size;
}

impl<D: Drawable + ?Sized> Drawable for Box<D> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        (**self).render_to_layers(position)
    }

    fn paint(&self, position: Point, surface: &mut Surface) {
        (**self).paint(position, surface)
    }

    fn size(&self) -> Size {
        (**self).size()
    }
}
