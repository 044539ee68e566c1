//! SVG export backend.

use log::{debug, info};
use svg::{Document, node::element as svg_element};

use super::{Error, Exporter};
use crate::layout::Figure;

/// Serializes a [`Figure`] as an SVG document measured in points.
///
/// The `viewBox` is the figure's tight bounds, so the coordinates in the
/// document are the figure's own coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgExporter;

impl SvgExporter {
    pub fn new() -> Self {
        Self
    }

    /// Builds the SVG document for `figure`.
    pub fn document(&self, figure: &Figure) -> Document {
        let bounds = figure.bounds();
        let background = figure.background();

        let mut doc = Document::new()
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    bounds.min_x(),
                    bounds.min_y(),
                    bounds.width(),
                    bounds.height()
                ),
            )
            .set("width", format!("{}pt", bounds.width()))
            .set("height", format!("{}pt", bounds.height()));

        let backdrop = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("fill", background.to_string())
            .set("fill-opacity", background.alpha());
        doc = doc.add(backdrop);

        let nodes = figure.render_to_layers().render();
        debug!(layers = nodes.len(); "SVG layers rendered");

        nodes.into_iter().fold(doc, |doc, node| doc.add(node))
    }
}

impl Exporter for SvgExporter {
    fn export(&self, figure: &Figure) -> Result<Vec<u8>, Error> {
        let mut bytes = Vec::new();
        svg::write(&mut bytes, &self.document(figure))?;

        info!(bytes = bytes.len(); "SVG document serialized");
        Ok(bytes)
    }
}
