use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use autofix_diagram_cli::{Args, ErrorAdapter, confirmation};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting autofix-diagram");
    debug!(args:?; "Parsed arguments");

    match autofix_diagram_cli::run(&args) {
        Ok(path) => {
            println!("{}", confirmation(&path));
        }
        Err(err) => {
            let reporter = miette::GraphicalReportHandler::new();
            let mut writer = String::new();
            if reporter
                .render_report(&mut writer, &ErrorAdapter(&err))
                .is_err()
            {
                writer = err.to_string();
            }

            error!("Failed\n{writer}");
            process::exit(1);
        }
    }

    info!("Completed successfully");
}
