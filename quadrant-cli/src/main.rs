//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use std::io;

use quadrant_cli::CliError;
use structured_logger::Builder;
use structured_logger::json::new_writer;

const LOG_LEVEL_ENV: &str = "QUADRANT_LOG";
const DEFAULT_LOG_LEVEL: &str = "warn";

fn main() {
    setup_logging();
    match quadrant_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("quadrant: {err}");
            std::process::exit(1);
        }
    }
}

// stdout carries command output, so log lines go to stderr.
fn setup_logging() {
    let level = std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_owned());
    Builder::with_level(&level)
        .with_target_writer("*", new_writer(io::stderr()))
        .init();
}
