//! Error types emitted by the Quadrant CLI.
//!
//! Keep this error type reasonably small, as every CLI helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use quadrant_core::{RouteError, SqliteCampusStoreError, StoreError};
use quadrant_data::{LoadSnapshotError, PersistSnapshotError, ProviderBuildError};
use thiserror::Error;

/// Errors emitted by the Quadrant CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Name of the CLI option.
        field: &'static str,
        /// Environment variable that can supply the option.
        env: &'static str,
    },
    /// A referenced input path does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Name of the CLI option.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Name of the CLI option.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Name of the CLI option.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Opening the campus database failed.
    #[error(transparent)]
    OpenDatabase(#[from] SqliteCampusStoreError),
    /// Reading from the campus store failed mid-query.
    #[error("campus store query failed: {0}")]
    Store(#[from] StoreError),
    /// Loading the JSON snapshot failed.
    #[error(transparent)]
    LoadSnapshot(#[from] LoadSnapshotError),
    /// Writing the snapshot into SQLite failed.
    #[error("failed to import snapshot into {path:?}: {source}")]
    PersistSnapshot {
        /// Destination database.
        path: Utf8PathBuf,
        /// Underlying persistence failure.
        #[source]
        source: PersistSnapshotError,
    },
    /// A route endpoint was not a valid `lon,lat` pair.
    #[error("invalid route endpoint: {0}")]
    InvalidEndpoint(#[source] RouteError),
    /// Constructing the directions provider failed.
    #[error("failed to build directions provider for {base_url:?}: {source}")]
    BuildRouteProvider {
        /// Base URL the provider was configured with.
        base_url: String,
        /// Underlying construction failure.
        #[source]
        source: ProviderBuildError,
    },
    /// The directions provider rejected or failed the request.
    #[error("directions request failed: {0}")]
    Directions(#[source] RouteError),
    /// Serializing command output failed.
    #[error("failed to serialize output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
