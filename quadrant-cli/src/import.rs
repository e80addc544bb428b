//! `import` command implementation.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use quadrant_core::CampusSnapshot;
use quadrant_data::{load_snapshot, persist_snapshot};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_DATABASE, ARG_SNAPSHOT, CliError, ENV_IMPORT_DATABASE, ENV_IMPORT_SNAPSHOT,
    require_existing,
};

/// CLI arguments for the `import` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "import",
    long_about = "Load a JSON campus snapshot (custom POIs, OSM points, OSM \
                 polygons and aliases) and write it into a SQLite database. \
                 Re-importing the same snapshot leaves the database \
                 unchanged.",
    about = "Import a campus snapshot"
)]
#[ortho_config(prefix = "QUADRANT")]
pub(crate) struct ImportArgs {
    /// Path to the JSON snapshot.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) snapshot: Option<Utf8PathBuf>,
    /// Path to the campus SQLite database; created when absent.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
}

impl ImportArgs {
    pub(crate) fn into_config(self) -> Result<ImportConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ImportConfig::try_from(merged)
    }
}

/// Resolved `import` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ImportConfig {
    pub(crate) snapshot: Utf8PathBuf,
    pub(crate) database: Utf8PathBuf,
}

impl TryFrom<ImportArgs> for ImportConfig {
    type Error = CliError;

    fn try_from(args: ImportArgs) -> Result<Self, Self::Error> {
        let snapshot = args.snapshot.ok_or(CliError::MissingArgument {
            field: ARG_SNAPSHOT,
            env: ENV_IMPORT_SNAPSHOT,
        })?;
        let database = args.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_IMPORT_DATABASE,
        })?;
        Ok(Self { snapshot, database })
    }
}

pub(super) fn run_import(args: ImportArgs) -> Result<(), CliError> {
    let config = args.into_config()?;
    let mut stdout = std::io::stdout().lock();
    execute_import(&config, &mut stdout)
}

pub(super) fn execute_import(config: &ImportConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    require_existing(&config.snapshot, ARG_SNAPSHOT)?;
    let snapshot = load_snapshot(&config.snapshot)?;
    persist_snapshot(&config.database, &snapshot).map_err(|source| {
        CliError::PersistSnapshot {
            path: config.database.clone(),
            source,
        }
    })?;
    writeln!(writer, "{}", import_summary(&snapshot, config)).map_err(CliError::WriteOutput)
}

fn import_summary(snapshot: &CampusSnapshot, config: &ImportConfig) -> String {
    format!(
        "imported {} custom POIs, {} OSM points, {} OSM polygons and {} aliases into {}",
        snapshot.custom_pois.len(),
        snapshot.osm_points.len(),
        snapshot.osm_polygons.len(),
        snapshot.aliases.len(),
        config.database,
    )
}
