//! Layer-based rendering system for SVG output.
//!
//! Drawables place each SVG node on a [`RenderLayer`]; [`LayeredOutput`]
//! collects the nodes and emits them grouped by layer, bottom to top.
//!
//! # Example
//!
//! ```
//! # use autofix_diagram_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::Rectangle;
//!
//! let mut output = LayeredOutput::new();
//!
//! let bg = Rectangle::new().set("fill", "white");
//! output.add_to_layer(RenderLayer::Background, Box::new(bg));
//!
//! let text = svg::node::element::Text::new("Hello");
//! output.add_to_layer(RenderLayer::Text, Box::new(text));
//!
//! let svg_nodes = output.render();
//! assert_eq!(svg_nodes.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Defines the rendering layers for SVG output.
///
/// Layers are rendered from bottom to top in the order defined by variant declaration.
/// The `Ord` derive uses declaration order, so the first variant renders first (bottom),
/// and the last variant renders last (top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Background elements (text backgrounds, frames) - renders first
    Background,
    /// Boxes - default layer
    Content,
    /// Connectors and guides
    Arrow,
    /// Text labels and annotations
    Text,
    /// Legend frame, handles and entry labels
    Legend,
}

impl RenderLayer {
    /// Returns a human-readable name for this layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Content => "content",
            Self::Arrow => "arrow",
            Self::Text => "text",
            Self::Legend => "legend",
        }
    }
}

/// Represents SVG nodes grouped by rendering layer.
///
/// When rendered, nodes are emitted in layer order (bottom to top). Within a
/// layer, nodes keep the order in which they were added.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single node to the specified layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Merges all layers from another `LayeredOutput` into this one.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of nodes across all layers.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Wraps every node in a `<g class="...">` element, keeping its layer.
    ///
    /// Exporters use this to tag the nodes of one scene element so that
    /// consumers of the SVG can select boxes, connectors and guides.
    ///
    /// ```
    /// # use autofix_diagram_core::draw::{RenderLayer, LayeredOutput};
    /// # use svg::node::element::Rectangle;
    /// let mut output = LayeredOutput::new();
    /// output.add_to_layer(RenderLayer::Content, Box::new(Rectangle::new()));
    ///
    /// let svg: String = output
    ///     .into_classed("box")
    ///     .render()
    ///     .iter()
    ///     .map(|n| n.to_string())
    ///     .collect();
    /// assert!(svg.contains(r#"class="box""#));
    /// ```
    pub fn into_classed(self, class: &str) -> Self {
        let items = self
            .items
            .into_iter()
            .map(|(layer, node)| {
                let group = svg_element::Group::new().set("class", class).add(node);
                (layer, Box::new(group) as SvgNode)
            })
            .collect();
        Self { items }
    }

    /// Moves every node onto `layer`, keeping their relative order.
    ///
    /// Composite elements such as a legend use this to stay above the
    /// content they annotate.
    pub fn into_layer(self, layer: RenderLayer) -> Self {
        let items = self
            .items
            .into_iter()
            .map(|(_, node)| (layer, node))
            .collect();
        Self { items }
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each non-empty layer becomes an SVG `<g>` element with a `data-layer`
    /// attribute identifying the layer. Empty layers are skipped.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        // Stable sort keeps insertion order within a layer
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current_layer = self.items[0].0;
        let mut current_group = svg_element::Group::new().set("data-layer", current_layer.name());

        for (layer, node) in self.items {
            if layer != current_layer {
                result.push(Box::new(current_group) as SvgNode);

                current_layer = layer;
                current_group = svg_element::Group::new().set("data-layer", layer.name());
            }

            current_group = current_group.add(node);
        }

        result.push(Box::new(current_group) as SvgNode);

        result
    }
}
