//! Campus snapshot import.
//!
//! A snapshot is a JSON document holding every campus record. Importing it
//! writes the SQLite layout read by [`quadrant_core::SqliteCampusStore`].
#![forbid(unsafe_code)]

use std::io::{self, BufReader};

use camino::{Utf8Path, Utf8PathBuf};
use geo::Point;
use log::info;
use quadrant_core::{CAMPUS_SCHEMA_SQL, CampusSnapshot};
use quadrant_fs::{create_parent_dirs, open_for_reading};
use rusqlite::{Connection, Error as SqliteError, Transaction};
use thiserror::Error;

/// Errors raised when reading a snapshot file.
#[derive(Debug, Error)]
pub enum LoadSnapshotError {
    /// The snapshot file could not be opened.
    #[error("failed to open snapshot {path:?}")]
    Open {
        /// Snapshot path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The snapshot is not valid JSON for a [`CampusSnapshot`].
    #[error("failed to parse snapshot {path:?}")]
    Parse {
        /// Snapshot path.
        path: Utf8PathBuf,
        /// Source error produced by `serde_json`.
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised when persisting a snapshot to SQLite.
#[derive(Debug, Error)]
pub enum PersistSnapshotError {
    /// Failed to create the parent directory for the SQLite artefact.
    #[error("failed to create parent directory for {path:?}")]
    CreateDirectory {
        /// Destination database path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path:?}")]
    Open {
        /// Destination database path.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Beginning the transaction failed.
    #[error("failed to begin snapshot persistence transaction")]
    BeginTransaction {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Creating the campus tables failed.
    #[error("failed to create campus tables")]
    CreateSchema {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// An identifier could not be represented as an SQLite integer.
    #[error("{table} id {id} exceeds SQLite i64 range")]
    IdOutOfRange {
        /// Table the row belongs to.
        table: &'static str,
        /// Identifier that failed the conversion.
        id: u64,
    },
    /// Serialising a polygon outline failed.
    #[error("failed to serialise geometry for polygon {id}")]
    SerializeGeometry {
        /// Identifier of the polygon.
        id: u64,
        /// Source error produced by `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Preparing an insert statement failed.
    #[error("failed to prepare {table} insert statement")]
    PrepareInsert {
        /// Target table.
        table: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Writing a row failed.
    #[error("failed to persist {table} row {key}")]
    PersistRow {
        /// Target table.
        table: &'static str,
        /// Row id, or alias text for `poi_alias`.
        key: String,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Committing the transaction failed.
    #[error("failed to commit snapshot persistence transaction")]
    Commit {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
}

/// Read a snapshot from a JSON file.
///
/// Missing top-level collections default to empty.
pub fn load_snapshot(path: &Utf8Path) -> Result<CampusSnapshot, LoadSnapshotError> {
    let file = open_for_reading(path).map_err(|source| LoadSnapshotError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| LoadSnapshotError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Persist a snapshot to a SQLite database on disk.
///
/// The import is idempotent: records are replaced when their ids already
/// exist and identical aliases are written once. Parent directories are
/// created automatically and the campus tables are initialised if missing.
/// Everything is written in one transaction.
///
/// # Examples
/// ```no_run
/// use camino::Utf8Path;
/// use quadrant_data::{load_snapshot, persist_snapshot};
///
/// let snapshot = load_snapshot(Utf8Path::new("campus.json"))?;
/// persist_snapshot(Utf8Path::new("data/campus.db"), &snapshot)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn persist_snapshot(
    path: &Utf8Path,
    snapshot: &CampusSnapshot,
) -> Result<(), PersistSnapshotError> {
    create_parent_dirs(path).map_err(|source| PersistSnapshotError::CreateDirectory {
        path: path.to_path_buf(),
        source,
    })?;
    let mut connection =
        Connection::open(path.as_std_path()).map_err(|source| PersistSnapshotError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    let transaction = connection
        .transaction()
        .map_err(|source| PersistSnapshotError::BeginTransaction { source })?;

    transaction
        .execute_batch(CAMPUS_SCHEMA_SQL)
        .map_err(|source| PersistSnapshotError::CreateSchema { source })?;
    persist_osm_points(&transaction, snapshot)?;
    persist_osm_polygons(&transaction, snapshot)?;
    persist_custom_pois(&transaction, snapshot)?;
    persist_aliases(&transaction, snapshot)?;

    transaction
        .commit()
        .map_err(|source| PersistSnapshotError::Commit { source })?;
    info!(
        "persisted {} custom POIs, {} OSM points, {} OSM polygons and {} aliases to {path}",
        snapshot.custom_pois.len(),
        snapshot.osm_points.len(),
        snapshot.osm_polygons.len(),
        snapshot.aliases.len(),
    );
    Ok(())
}

fn sql_id(table: &'static str, id: u64) -> Result<i64, PersistSnapshotError> {
    i64::try_from(id).map_err(|_| PersistSnapshotError::IdOutOfRange { table, id })
}

fn optional_sql_id(table: &'static str, id: Option<u64>) -> Result<Option<i64>, PersistSnapshotError> {
    id.map(|id| sql_id(table, id)).transpose()
}

fn point_columns(point: Option<&Point<f64>>) -> (Option<f64>, Option<f64>) {
    point.map_or((None, None), |p| (Some(p.x()), Some(p.y())))
}

fn prepare<'t>(
    transaction: &'t Transaction<'_>,
    table: &'static str,
    sql: &str,
) -> Result<rusqlite::Statement<'t>, PersistSnapshotError> {
    transaction
        .prepare(sql)
        .map_err(|source| PersistSnapshotError::PrepareInsert { table, source })
}

fn row_error(table: &'static str, key: impl ToString, source: SqliteError) -> PersistSnapshotError {
    PersistSnapshotError::PersistRow {
        table,
        key: key.to_string(),
        source,
    }
}

fn persist_osm_points(
    transaction: &Transaction<'_>,
    snapshot: &CampusSnapshot,
) -> Result<(), PersistSnapshotError> {
    const TABLE: &str = "osm_point";
    let mut statement = prepare(
        transaction,
        TABLE,
        "INSERT OR REPLACE INTO osm_point (osm_id, name, lon, lat) VALUES (?1, ?2, ?3, ?4)",
    )?;
    for point in &snapshot.osm_points {
        let (lon, lat) = point_columns(point.geometry.as_ref());
        statement
            .execute((sql_id(TABLE, point.id)?, point.name.as_deref(), lon, lat))
            .map_err(|source| row_error(TABLE, point.id, source))?;
    }
    Ok(())
}

fn persist_osm_polygons(
    transaction: &Transaction<'_>,
    snapshot: &CampusSnapshot,
) -> Result<(), PersistSnapshotError> {
    const TABLE: &str = "osm_polygon";
    let mut statement = prepare(
        transaction,
        TABLE,
        "INSERT OR REPLACE INTO osm_polygon (osm_id, name, geom) VALUES (?1, ?2, ?3)",
    )?;
    for polygon in &snapshot.osm_polygons {
        let geom = polygon
            .geometry
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|source| PersistSnapshotError::SerializeGeometry {
                id: polygon.id,
                source,
            })?;
        statement
            .execute((sql_id(TABLE, polygon.id)?, polygon.name.as_deref(), geom))
            .map_err(|source| row_error(TABLE, polygon.id, source))?;
    }
    Ok(())
}

fn persist_custom_pois(
    transaction: &Transaction<'_>,
    snapshot: &CampusSnapshot,
) -> Result<(), PersistSnapshotError> {
    const TABLE: &str = "custom_poi";
    let mut statement = prepare(
        transaction,
        TABLE,
        "INSERT OR REPLACE INTO custom_poi
            (id, name, website, location_desc, type, description, parent_osm_id, lon, lat)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )?;
    for poi in &snapshot.custom_pois {
        let (lon, lat) = point_columns(poi.coordinate.as_ref());
        statement
            .execute((
                sql_id(TABLE, poi.id)?,
                poi.name.as_str(),
                poi.website.as_str(),
                poi.location_description.as_deref(),
                poi.kind.as_deref(),
                poi.description.as_str(),
                optional_sql_id(TABLE, poi.parent_osm_object_id)?,
                lon,
                lat,
            ))
            .map_err(|source| row_error(TABLE, poi.id, source))?;
    }
    Ok(())
}

fn persist_aliases(
    transaction: &Transaction<'_>,
    snapshot: &CampusSnapshot,
) -> Result<(), PersistSnapshotError> {
    const TABLE: &str = "poi_alias";
    let mut statement = prepare(
        transaction,
        TABLE,
        "INSERT OR IGNORE INTO poi_alias (alias_text, custom_poi_id, osm_id) VALUES (?1, ?2, ?3)",
    )?;
    for alias in &snapshot.aliases {
        statement
            .execute((
                alias.alias_text.as_str(),
                optional_sql_id(TABLE, alias.custom_poi_id)?,
                optional_sql_id(TABLE, alias.osm_object_id)?,
            ))
            .map_err(|source| row_error(TABLE, &alias.alias_text, source))?;
    }
    Ok(())
}
