//! Command-line interface for the Quadrant campus map.
//!
//! Subcommands search and list campus POIs from a SQLite database, import
//! JSON snapshots into that database, and proxy walking directions. Every
//! option can come from CLI flags, configuration files, or environment
//! variables scoped to the subcommand (`QUADRANT_CMDS_<SUBCOMMAND>_<FIELD>`).
#![forbid(unsafe_code)]

use std::io::Write;

use camino::Utf8Path;
use clap::{Parser, Subcommand};
use quadrant_fs::PathStatus;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

mod error;
mod import;
mod route;
mod search;

pub use error::CliError;

use import::{ImportArgs, run_import};
use route::{RouteArgs, run_route};
use search::{ListArgs, SearchArgs, run_list, run_search};

pub(crate) const ARG_QUERY: &str = "query";
pub(crate) const ARG_DATABASE: &str = "database";
pub(crate) const ARG_SEED: &str = "seed";
pub(crate) const ARG_SNAPSHOT: &str = "snapshot";
pub(crate) const ARG_START: &str = "start";
pub(crate) const ARG_END: &str = "end";
pub(crate) const ARG_BASE_URL: &str = "base-url";
pub(crate) const ARG_API_KEY: &str = "api-key";
pub(crate) const ARG_PROFILE: &str = "profile";

pub(crate) const ENV_SEARCH_QUERY: &str = "QUADRANT_CMDS_SEARCH_QUERY";
pub(crate) const ENV_SEARCH_DATABASE: &str = "QUADRANT_CMDS_SEARCH_DATABASE";
pub(crate) const ENV_LIST_DATABASE: &str = "QUADRANT_CMDS_LIST_DATABASE";
pub(crate) const ENV_IMPORT_SNAPSHOT: &str = "QUADRANT_CMDS_IMPORT_SNAPSHOT";
pub(crate) const ENV_IMPORT_DATABASE: &str = "QUADRANT_CMDS_IMPORT_DATABASE";
pub(crate) const ENV_ROUTE_START: &str = "QUADRANT_CMDS_ROUTE_START";
pub(crate) const ENV_ROUTE_END: &str = "QUADRANT_CMDS_ROUTE_END";

/// Run the Quadrant CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when argument parsing, configuration layering, or
/// the selected command fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Search(args) => run_search(args),
        Command::List(args) => run_list(args),
        Command::Import(args) => run_import(args),
        Command::Route(args) => run_route(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "quadrant",
    about = "Search campus points of interest and fetch walking directions",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search POIs by name or alias and print GeoJSON.
    Search(SearchArgs),
    /// List every curated POI with its full attributes as GeoJSON.
    List(ListArgs),
    /// Import a JSON campus snapshot into a SQLite database.
    Import(ImportArgs),
    /// Fetch walking directions between two coordinates.
    Route(RouteArgs),
}

/// Checks that `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match quadrant_fs::inspect_path(path) {
        Ok(PathStatus::File) => Ok(()),
        Ok(PathStatus::NotAFile) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Ok(PathStatus::Missing) => Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Seeded when the caller asks for reproducible output, otherwise from OS
/// entropy.
pub(crate) fn sampling_rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
}

/// Pretty-prints `value` as JSON followed by a newline.
pub(crate) fn write_json<T>(writer: &mut dyn Write, value: &T) -> Result<(), CliError>
where
    T: Serialize + ?Sized,
{
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerializeOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
