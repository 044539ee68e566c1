//! Integration tests for the DiagramRenderer API

use std::fs;

use autofix_diagram::{
    DiagramError, DiagramRenderer,
    architecture::{BOX_COUNT, COMPONENT_COUNT, CONNECTOR_COUNT, DEFAULT_OUTPUT},
    config::{AppConfig, FigureConfig, OutputConfig, StyleConfig},
};

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

fn renderer_at(dpi: f32) -> DiagramRenderer {
    DiagramRenderer::new(AppConfig::new(
        FigureConfig::default(),
        OutputConfig::new(dpi, 0.1),
        StyleConfig::default(),
    ))
}

fn be_u32(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

fn png_dimensions(png: &[u8]) -> (u32, u32) {
    // IHDR is the first chunk; its data starts after signature, length and type
    (be_u32(&png[16..20]), be_u32(&png[20..24]))
}

fn png_phys(png: &[u8]) -> Option<(u32, u32, u8)> {
    let start = png.windows(4).position(|window| window == b"pHYs")? + 4;
    let data = &png[start..start + 9];
    Some((be_u32(&data[0..4]), be_u32(&data[4..8]), data[8]))
}

#[test]
fn test_canvas_counts() {
    let canvas = DiagramRenderer::default().canvas().unwrap();

    assert_eq!(canvas.shapes().len(), BOX_COUNT);
    assert_eq!(canvas.component_count(), COMPONENT_COUNT);
    assert_eq!(canvas.connectors().len(), CONNECTOR_COUNT);
}

#[test]
fn test_render_twice_is_identical() {
    let renderer = renderer_at(30.0);
    let first = renderer.canvas().unwrap();
    let second = renderer.canvas().unwrap();
    assert_eq!(first, second);

    assert_eq!(
        renderer.render_png(&first).unwrap(),
        renderer.render_png(&second).unwrap()
    );
    assert_eq!(
        renderer.render_svg(&first).unwrap(),
        renderer.render_svg(&second).unwrap()
    );
}

#[test]
fn test_render_svg_tags_boxes() {
    let renderer = DiagramRenderer::default();
    let svg = renderer.render_svg(&renderer.canvas().unwrap()).unwrap();

    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert_eq!(svg.matches(r#"class="box""#).count(), BOX_COUNT);
    assert_eq!(svg.matches(r#"class="connector""#).count(), CONNECTOR_COUNT);
}

#[test]
fn test_render_png_header() {
    let renderer = renderer_at(72.0);
    let canvas = renderer.canvas().unwrap();
    let png = renderer.render_png(&canvas).unwrap();

    assert_eq!(&png[..8], PNG_SIGNATURE);

    let bounds = renderer.figure(&canvas).unwrap().bounds();
    assert_eq!(
        png_dimensions(&png),
        (bounds.width().ceil() as u32, bounds.height().ceil() as u32)
    );
    // 72 dpi is 2835 pixels per meter, unit 1 is the meter
    assert_eq!(png_phys(&png), Some((2835, 2835, 1)));
}

#[test]
fn test_png_scales_with_dpi() {
    let canvas = DiagramRenderer::default().canvas().unwrap();
    let (low_w, low_h) = png_dimensions(&renderer_at(36.0).render_png(&canvas).unwrap());
    let (high_w, high_h) = png_dimensions(&renderer_at(72.0).render_png(&canvas).unwrap());

    assert!(high_w.abs_diff(low_w * 2) <= 1);
    assert!(high_h.abs_diff(low_h * 2) <= 1);
}

#[test]
fn test_render_writes_png_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_OUTPUT);

    let written = renderer_at(50.0).render(&path).unwrap();

    assert_eq!(written, path);
    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(PNG_SIGNATURE));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_render_writes_svg_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diagram.SVG");

    DiagramRenderer::default().render(&path).unwrap();

    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains("<svg"));
}

#[test]
fn test_render_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_OUTPUT);
    fs::write(&path, b"stale").unwrap();

    renderer_at(30.0).render(&path).unwrap();

    assert!(fs::read(&path).unwrap().starts_with(PNG_SIGNATURE));
}

#[cfg(unix)]
#[test]
fn test_new_file_gets_default_mode() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let reference = dir.path().join("reference.txt");
    fs::write(&reference, b"reference").unwrap();
    let path = dir.path().join(DEFAULT_OUTPUT);

    renderer_at(30.0).render(&path).unwrap();

    let mode = |p: &std::path::Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode(&path), mode(&reference));
}

#[cfg(unix)]
#[test]
fn test_overwrite_keeps_existing_mode() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_OUTPUT);
    fs::write(&path, b"stale").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

    renderer_at(30.0).render(&path).unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o640);
    assert!(fs::read(&path).unwrap().starts_with(PNG_SIGNATURE));
}

#[test]
fn test_unsupported_format_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diagram.jpg");

    let err = DiagramRenderer::default().render(&path).unwrap_err();

    assert!(matches!(err, DiagramError::UnsupportedFormat { .. }));
    assert!(!path.exists());
}

#[test]
fn test_missing_directory_fails_without_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join(DEFAULT_OUTPUT);

    let err = renderer_at(30.0).render(&path).unwrap_err();

    assert!(matches!(err, DiagramError::Io(_)));
    assert!(!path.exists());
}

#[test]
fn test_backend_failure_leaves_prior_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_OUTPUT);
    fs::write(&path, b"previous").unwrap();

    let err = renderer_at(1e6).render(&path).unwrap_err();

    assert!(matches!(err, DiagramError::Export(_)));
    assert_eq!(fs::read(&path).unwrap(), b"previous");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_invalid_config_is_rejected() {
    let renderer = DiagramRenderer::new(AppConfig::new(
        FigureConfig::new(-1.0, 10.0),
        OutputConfig::default(),
        StyleConfig::default(),
    ));
    let canvas = renderer.canvas().unwrap();

    let err = renderer.render_png(&canvas).unwrap_err();
    assert!(matches!(err, DiagramError::Config(_)));
}
