use std::{fs, path::Path};

use clap::Parser;
use tempfile::tempdir;

use autofix_diagram_cli::{Args, confirmation, run};

fn args(output: String) -> Args {
    Args {
        output,
        config: None,
        dpi: Some(40.0),
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_png() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("systems-diagram.png");

    let written = run(&args(output.to_string_lossy().to_string())).expect("render failed");

    assert_eq!(written, output);
    assert!(written.to_string_lossy().contains("systems-diagram.png"));
    let bytes = fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
}

#[test]
fn e2e_confirmation_for_default_output() {
    let defaults = Args::parse_from(["autofix-diagram"]);

    assert_eq!(
        confirmation(Path::new(&defaults.output)),
        "✅ Systems diagram generated: systems-diagram.png"
    );
}

#[test]
fn e2e_confirmation_names_written_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("systems-diagram.png");

    let written = run(&args(output.to_string_lossy().to_string())).expect("render failed");

    let line = confirmation(&written);
    assert!(line.starts_with("✅ Systems diagram generated: "));
    assert!(line.ends_with(&output.display().to_string()));
}

#[test]
fn e2e_smoke_test_svg() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("systems-diagram.svg");

    run(&args(output.to_string_lossy().to_string())).expect("render failed");

    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.contains("</svg>"));
}

#[test]
fn e2e_smoke_test_config_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config = temp_dir.path().join("config.toml");
    fs::write(&config, "[output]\ndpi = 20.0\npadding = 0.0\n").unwrap();
    let output = temp_dir.path().join("out.png");

    let args = Args {
        output: output.to_string_lossy().to_string(),
        config: Some(config.to_string_lossy().to_string()),
        dpi: None,
        log_level: "off".to_string(),
    };
    run(&args).expect("render failed");

    assert!(output.exists());
}

#[test]
fn e2e_smoke_test_errors_leave_no_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let missing_dir = temp_dir.path().join("missing").join("systems-diagram.png");
    assert!(run(&args(missing_dir.to_string_lossy().to_string())).is_err());
    assert!(!missing_dir.exists());

    let bad_extension = temp_dir.path().join("systems-diagram.gif");
    assert!(run(&args(bad_extension.to_string_lossy().to_string())).is_err());
    assert!(!bad_extension.exists());

    let mut bad_dpi = args(temp_dir.path().join("a.png").to_string_lossy().to_string());
    bad_dpi.dpi = Some(0.0);
    assert!(run(&bad_dpi).is_err());

    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}
