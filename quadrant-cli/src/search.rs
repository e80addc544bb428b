//! `search` and `list` command implementations.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use quadrant_core::{Directory, SqliteCampusStore, build_feature_collection};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_DATABASE, ARG_QUERY, ARG_SEED, CliError, ENV_LIST_DATABASE, ENV_SEARCH_DATABASE,
    ENV_SEARCH_QUERY, require_existing, sampling_rng, write_json,
};

/// CLI arguments for the `search` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "search",
    long_about = "Search custom POIs, OSM points and OSM polygons whose name \
                 or alias contains the query, ignoring case. Matches are \
                 printed as a GeoJSON FeatureCollection; polygons are placed \
                 at a random interior point.",
    about = "Search POIs by name or alias"
)]
#[ortho_config(prefix = "QUADRANT")]
pub(crate) struct SearchArgs {
    /// Substring to look for; an empty string matches every named POI.
    #[arg(value_name = "query")]
    #[serde(default)]
    pub(crate) query: Option<String>,
    /// Path to the campus SQLite database.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Seed for polygon interior sampling.
    #[arg(long = ARG_SEED, value_name = "seed")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
}

impl SearchArgs {
    pub(crate) fn into_config(self) -> Result<SearchConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SearchConfig::try_from(merged)
    }
}

/// Resolved `search` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SearchConfig {
    pub(crate) query: String,
    pub(crate) database: Utf8PathBuf,
    pub(crate) seed: Option<u64>,
}

impl TryFrom<SearchArgs> for SearchConfig {
    type Error = CliError;

    fn try_from(args: SearchArgs) -> Result<Self, Self::Error> {
        let query = args.query.ok_or(CliError::MissingArgument {
            field: ARG_QUERY,
            env: ENV_SEARCH_QUERY,
        })?;
        let database = args.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_SEARCH_DATABASE,
        })?;
        Ok(Self {
            query,
            database,
            seed: args.seed,
        })
    }
}

/// CLI arguments for the `list` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "list",
    long_about = "Print every curated POI that can be placed on the map, \
                 with its description, type, location and website, as a \
                 GeoJSON FeatureCollection.",
    about = "List curated POIs"
)]
#[ortho_config(prefix = "QUADRANT")]
pub(crate) struct ListArgs {
    /// Path to the campus SQLite database.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Seed for polygon interior sampling.
    #[arg(long = ARG_SEED, value_name = "seed")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
}

impl ListArgs {
    pub(crate) fn into_config(self) -> Result<ListConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ListConfig::try_from(merged)
    }
}

/// Resolved `list` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ListConfig {
    pub(crate) database: Utf8PathBuf,
    pub(crate) seed: Option<u64>,
}

impl TryFrom<ListArgs> for ListConfig {
    type Error = CliError;

    fn try_from(args: ListArgs) -> Result<Self, Self::Error> {
        let database = args.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_LIST_DATABASE,
        })?;
        Ok(Self {
            database,
            seed: args.seed,
        })
    }
}

pub(super) fn run_search(args: SearchArgs) -> Result<(), CliError> {
    let config = args.into_config()?;
    let mut stdout = std::io::stdout().lock();
    execute_search(&config, &mut stdout)
}

pub(super) fn run_list(args: ListArgs) -> Result<(), CliError> {
    let config = args.into_config()?;
    let mut stdout = std::io::stdout().lock();
    execute_list(&config, &mut stdout)
}

pub(super) fn execute_search(config: &SearchConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let directory = open_directory(&config.database)?;
    let mut rng = sampling_rng(config.seed);
    let features = directory.search(&config.query, &mut rng)?;
    debug!(
        "search for {:?} matched {} features",
        config.query,
        features.len()
    );
    write_json(writer, &build_feature_collection(features))
}

pub(super) fn execute_list(config: &ListConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let directory = open_directory(&config.database)?;
    let mut rng = sampling_rng(config.seed);
    let features = directory.listing(&mut rng)?;
    debug!("listing produced {} features", features.len());
    write_json(writer, &build_feature_collection(features))
}

fn open_directory(database: &Utf8Path) -> Result<Directory<SqliteCampusStore>, CliError> {
    require_existing(database, ARG_DATABASE)?;
    let store = SqliteCampusStore::open(database.as_std_path())?;
    Ok(Directory::new(store))
}

#[cfg(test)]
pub(crate) fn search_config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SearchConfig, CliError> {
    let merged = SearchArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SearchConfig::try_from(merged)
}
