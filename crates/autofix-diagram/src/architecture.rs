//! The Sentry-Claude Autofix architecture scene.
//!
//! Every box, arrow, guide, label and legend entry of the diagram is a
//! literal here. The scene depicts nine components; the first one
//! (external services) is drawn as two boxes, so the canvas holds ten
//! boxes tagged with nine distinct components.

use autofix_diagram_core::{
    color::Color,
    draw::{
        ArrowDirection, FontStyle, FontWeight, HorizontalAlign, StrokeStyle, TextAlign,
        VerticalAlign,
    },
    geometry::{Point, Size},
};

use crate::{
    DiagramError,
    canvas::{
        Canvas, Connector, CornerStyle, Guide, Label, LabelBackground, Legend, LegendEntry, Shape,
    },
};

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "systems-diagram.png";

/// Number of distinct components depicted.
pub const COMPONENT_COUNT: usize = 9;

/// Number of boxes drawn.
pub const BOX_COUNT: usize = 10;

/// Number of arrows drawn.
pub const CONNECTOR_COUNT: usize = 10;

/// Number of configuration guide lines drawn.
pub const GUIDE_COUNT: usize = 3;

/// Number of text annotations drawn, legend excluded.
pub const LABEL_COUNT: usize = 41;

/// Number of legend entries.
pub const LEGEND_ENTRY_COUNT: usize = 6;

const CANVAS_EXTENT: f32 = 10.0;
const BOX_PAD: f32 = 0.1;
const ARROW_WIDTH: f32 = 2.0;
const MUTATION_SCALE: f32 = 20.0;

const FILL_EXTERNAL: &str = "#E3F2FD";
const FILL_CLIENT: &str = "#FFF3E0";
const FILL_ANALYZER: &str = "#F3E5F5";
const FILL_ORCHESTRATOR: &str = "#E8F5E9";
const FILL_CLAUDE: &str = "#FFF9C4";
const FILL_OUTPUT: &str = "#FFEBEE";

fn color(value: &str) -> Result<Color, DiagramError> {
    Color::new(value).map_err(DiagramError::Canvas)
}

/// A centered line of box text.
struct BoxLine {
    y: f32,
    text: &'static str,
    size: u16,
    weight: FontWeight,
    style: FontStyle,
}

const fn bold(y: f32, text: &'static str, size: u16) -> BoxLine {
    BoxLine {
        y,
        text,
        size,
        weight: FontWeight::Bold,
        style: FontStyle::Normal,
    }
}

const fn plain(y: f32, text: &'static str, size: u16) -> BoxLine {
    BoxLine {
        y,
        text,
        size,
        weight: FontWeight::Normal,
        style: FontStyle::Normal,
    }
}

const fn italic(y: f32, text: &'static str, size: u16) -> BoxLine {
    BoxLine {
        y,
        text,
        size,
        weight: FontWeight::Normal,
        style: FontStyle::Italic,
    }
}

/// One box of the scene with its text.
struct BoxSpec {
    component: &'static str,
    origin: (f32, f32),
    size: (f32, f32),
    edge: &'static str,
    fill: &'static str,
    width: f32,
    style: StrokeStyle,
    center_x: f32,
    lines: &'static [BoxLine],
}

/// One arrow of the scene with its annotations.
struct ArrowSpec {
    from: (f32, f32),
    to: (f32, f32),
    direction: ArrowDirection,
    color: &'static str,
    style: StrokeStyle,
    alpha: f32,
    labels: &'static [(f32, f32, &'static str, FontStyle)],
}

const BOXES: [BoxSpec; BOX_COUNT] = [
    BoxSpec {
        component: "External Services",
        origin: (0.5, 7.5),
        size: (2.0, 1.0),
        edge: "#1976D2",
        fill: FILL_EXTERNAL,
        width: 2.0,
        style: StrokeStyle::Solid,
        center_x: 1.5,
        lines: &[bold(8.3, "Sentry.io", 11), plain(8.0, "Error Tracking", 9)],
    },
    BoxSpec {
        component: "External Services",
        origin: (7.5, 7.5),
        size: (2.0, 1.0),
        edge: "#F57C00",
        fill: FILL_EXTERNAL,
        width: 2.0,
        style: StrokeStyle::Solid,
        center_x: 8.5,
        lines: &[bold(8.3, "Claude API", 11), plain(8.0, "Anthropic", 9)],
    },
    BoxSpec {
        component: "Sentry Client",
        origin: (0.5, 6.0),
        size: (2.0, 1.0),
        edge: "#E64A19",
        fill: FILL_CLIENT,
        width: 2.0,
        style: StrokeStyle::Solid,
        center_x: 1.5,
        lines: &[
            bold(6.7, "SentryClient", 10),
            plain(6.4, "Fetch Issues", 8),
            plain(6.15, "& Events", 8),
        ],
    },
    BoxSpec {
        component: "Issue Analyzer",
        origin: (3.5, 6.0),
        size: (2.0, 1.0),
        edge: "#7B1FA2",
        fill: FILL_ANALYZER,
        width: 2.0,
        style: StrokeStyle::Solid,
        center_x: 4.5,
        lines: &[
            bold(6.7, "IssueAnalyzer", 10),
            plain(6.4, "Parse Stack", 8),
            plain(6.15, "Traces", 8),
        ],
    },
    BoxSpec {
        component: "Orchestrator",
        origin: (3.5, 4.2),
        size: (3.0, 1.2),
        edge: "#388E3C",
        fill: FILL_ORCHESTRATOR,
        width: 3.0,
        style: StrokeStyle::Solid,
        center_x: 5.0,
        lines: &[
            bold(5.1, "Orchestrator", 12),
            plain(4.8, "Workflow Coordinator", 9),
            plain(4.5, "• Filter Issues  • Read Files  • Manage Flow", 7),
        ],
    },
    BoxSpec {
        component: "Local Codebase",
        origin: (0.5, 4.0),
        size: (2.0, 1.0),
        edge: "#455A64",
        fill: "#ECEFF1",
        width: 2.0,
        style: StrokeStyle::Solid,
        center_x: 1.5,
        lines: &[bold(4.7, "Local Codebase", 10), plain(4.4, "Source Files", 8)],
    },
    BoxSpec {
        component: "Claude Agent",
        origin: (7.5, 4.5),
        size: (2.0, 1.5),
        edge: "#F57C00",
        fill: FILL_CLAUDE,
        width: 2.0,
        style: StrokeStyle::Solid,
        center_x: 8.5,
        lines: &[
            bold(5.6, "ClaudeAgent", 10),
            plain(5.3, "Build Prompts", 8),
            plain(5.05, "Call Claude API", 8),
            plain(4.8, "Parse Response", 8),
        ],
    },
    BoxSpec {
        component: "Output Files",
        origin: (3.5, 2.5),
        size: (3.0, 1.0),
        edge: "#C62828",
        fill: FILL_OUTPUT,
        width: 2.0,
        style: StrokeStyle::Solid,
        center_x: 5.0,
        lines: &[
            bold(3.2, "Output Files", 10),
            plain(2.9, "JSON + Markdown Proposals", 8),
        ],
    },
    BoxSpec {
        component: "Sentry Comments",
        origin: (0.5, 2.5),
        size: (2.0, 1.0),
        edge: "#1976D2",
        fill: FILL_EXTERNAL,
        width: 2.0,
        style: StrokeStyle::Dashed,
        center_x: 1.5,
        lines: &[
            bold(3.2, "Sentry", 10),
            plain(2.9, "Comments", 8),
            italic(2.65, "(optional)", 7),
        ],
    },
    BoxSpec {
        component: "Configuration",
        origin: (7.5, 2.5),
        size: (2.0, 1.0),
        edge: "#616161",
        fill: "#F5F5F5",
        width: 2.0,
        style: StrokeStyle::Solid,
        center_x: 8.5,
        lines: &[
            bold(3.2, "Configuration", 10),
            plain(2.9, ".env File", 8),
            plain(2.65, "API Keys & Settings", 7),
        ],
    },
];

const ARROWS: [ArrowSpec; CONNECTOR_COUNT] = [
    ArrowSpec {
        from: (1.5, 7.5),
        to: (1.5, 7.0),
        direction: ArrowDirection::Forward,
        color: "#1976D2",
        style: StrokeStyle::Solid,
        alpha: 1.0,
        labels: &[(1.8, 7.25, "API", FontStyle::Normal)],
    },
    ArrowSpec {
        from: (2.5, 6.5),
        to: (3.5, 6.5),
        direction: ArrowDirection::Forward,
        color: "#7B1FA2",
        style: StrokeStyle::Solid,
        alpha: 1.0,
        labels: &[(3.0, 6.7, "Issues", FontStyle::Normal)],
    },
    ArrowSpec {
        from: (4.5, 6.0),
        to: (4.5, 5.4),
        direction: ArrowDirection::Forward,
        color: "#388E3C",
        style: StrokeStyle::Solid,
        alpha: 1.0,
        labels: &[(4.8, 5.7, "Context", FontStyle::Normal)],
    },
    ArrowSpec {
        from: (3.5, 4.8),
        to: (2.5, 4.5),
        direction: ArrowDirection::Backward,
        color: "#455A64",
        style: StrokeStyle::Dashed,
        alpha: 1.0,
        labels: &[(2.8, 4.3, "read", FontStyle::Italic)],
    },
    ArrowSpec {
        from: (6.5, 4.8),
        to: (7.5, 5.2),
        direction: ArrowDirection::Forward,
        color: "#F57C00",
        style: StrokeStyle::Solid,
        alpha: 1.0,
        labels: &[
            (6.8, 5.2, "Context +", FontStyle::Normal),
            (6.8, 4.95, "Code", FontStyle::Normal),
        ],
    },
    ArrowSpec {
        from: (8.5, 6.0),
        to: (8.5, 7.5),
        direction: ArrowDirection::Bidirectional,
        color: "#F57C00",
        style: StrokeStyle::Solid,
        alpha: 1.0,
        labels: &[(8.8, 6.75, "API", FontStyle::Normal)],
    },
    ArrowSpec {
        from: (7.5, 4.8),
        to: (6.5, 4.8),
        direction: ArrowDirection::Forward,
        color: "#F57C00",
        style: StrokeStyle::Dashed,
        alpha: 1.0,
        labels: &[(7.0, 5.0, "Fix", FontStyle::Normal), (7.0, 4.75, "Proposal", FontStyle::Normal)],
    },
    ArrowSpec {
        from: (5.0, 4.2),
        to: (5.0, 3.5),
        direction: ArrowDirection::Forward,
        color: "#C62828",
        style: StrokeStyle::Solid,
        alpha: 1.0,
        labels: &[(5.3, 3.85, "Save", FontStyle::Normal)],
    },
    ArrowSpec {
        from: (3.5, 3.5),
        to: (2.5, 3.0),
        direction: ArrowDirection::Forward,
        color: "#1976D2",
        style: StrokeStyle::Dashed,
        alpha: 1.0,
        labels: &[(2.8, 3.4, "Post", FontStyle::Normal)],
    },
    ArrowSpec {
        from: (1.5, 3.5),
        to: (1.5, 7.5),
        direction: ArrowDirection::Forward,
        color: "#1976D2",
        style: StrokeStyle::Dashed,
        alpha: 0.4,
        labels: &[],
    },
];

const GUIDES: [((f32, f32), (f32, f32)); GUIDE_COUNT] = [
    ((8.5, 2.5), (1.5, 6.0)),
    ((8.5, 2.5), (5.0, 4.2)),
    ((8.5, 2.5), (8.5, 4.5)),
];

fn point((x, y): (f32, f32)) -> Point {
    Point::new(x, y)
}

/// Builds the complete architecture scene.
///
/// Box text follows its box and arrow annotations follow their arrow, so
/// labels keep a stable, readable order.
///
/// # Errors
///
/// Returns [`DiagramError::Canvas`] if a literal is invalid; the fixed
/// scene itself always builds.
pub fn build() -> Result<Canvas, DiagramError> {
    let mut canvas = Canvas::new(CANVAS_EXTENT, CANVAS_EXTENT)?;

    canvas.add_label(
        Label::new(Point::new(5.0, 9.5), "Sentry-Claude Autofix System Architecture")
            .with_font_size(18)
            .with_weight(FontWeight::Bold)
            .with_align(TextAlign::new(HorizontalAlign::Center, VerticalAlign::Top)),
    )?;

    for spec in BOXES {
        canvas.add_shape(
            Shape::new(spec.component, point(spec.origin), Size::new(spec.size.0, spec.size.1))
                .with_corner(CornerStyle::Rounded { pad: BOX_PAD })
                .with_edge_color(color(spec.edge)?)
                .with_fill_color(color(spec.fill)?)
                .with_line_width(spec.width)
                .with_line_style(spec.style),
        )?;
        for line in spec.lines {
            canvas.add_label(
                Label::new(Point::new(spec.center_x, line.y), line.text)
                    .with_font_size(line.size)
                    .with_weight(line.weight)
                    .with_style(line.style)
                    .with_align(TextAlign::centered()),
            )?;
        }
    }

    for spec in ARROWS {
        canvas.add_connector(
            Connector::new(point(spec.from), point(spec.to), spec.direction)
                .with_color(color(spec.color)?.with_alpha(spec.alpha))
                .with_line_style(spec.style)
                .with_line_width(ARROW_WIDTH)
                .with_mutation_scale(MUTATION_SCALE),
        )?;
        for &(x, y, text, style) in spec.labels {
            canvas.add_label(
                Label::new(Point::new(x, y), text)
                    .with_font_size(8)
                    .with_style(style),
            )?;
        }
    }

    let guide_color = Color::default().with_alpha(0.3);
    for (from, to) in GUIDES {
        canvas.add_guide(
            Guide::new(point(from), point(to))
                .with_color(guide_color)
                .with_line_style(StrokeStyle::Dotted)
                .with_line_width(1.0),
        )?;
    }

    let black = Color::default();
    canvas.set_legend(Legend::new(
        vec![
            LegendEntry::patch("External Services", color(FILL_EXTERNAL)?, black),
            LegendEntry::patch("API Clients", color(FILL_CLIENT)?, black),
            LegendEntry::patch("Analyzers", color(FILL_ANALYZER)?, black),
            LegendEntry::patch("Orchestration", color(FILL_ORCHESTRATOR)?, black),
            LegendEntry::patch("Output", color(FILL_OUTPUT)?, black),
            LegendEntry::line("Optional Flow", black, StrokeStyle::Dashed, 1.5),
        ],
        3,
        8,
    ))?;

    canvas.add_label(
        Label::new(
            Point::new(5.0, 0.5),
            "Sentry-Claude Autofix • Automated Error Investigation & Fix Proposals",
        )
        .with_font_size(9)
        .with_style(FontStyle::Italic)
        .with_color(color("#666666")?)
        .with_align(TextAlign::centered()),
    )?;

    canvas.add_label(
        Label::new(
            Point::new(5.0, 1.3),
            "Data Flow: Sentry Issues → Analysis → Claude AI → Fix Proposals → Output",
        )
        .with_font_size(8)
        .with_align(TextAlign::centered())
        .with_background(LabelBackground {
            fill: color("#FFFFCC")?,
            edge: color("#999999")?,
            pad: 0.5,
        }),
    )?;

    log::debug!(
        boxes = canvas.shapes().len(),
        connectors = canvas.connectors().len(),
        labels = canvas.labels().len();
        "Architecture scene built"
    );

    Ok(canvas)
}
