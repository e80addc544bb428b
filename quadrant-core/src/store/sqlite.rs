//! SQLite-backed store implementation for campus records.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use geo::{Point, Polygon};
use log::warn;
use rusqlite::{Connection, OpenFlags, OptionalExtension, Params, Row};
use thiserror::Error;

use crate::{Alias, CustomPoi, OsmPoint, OsmPolygon};

use super::{CampusStore, StoreError};

/// Schema shared by the store and the snapshot importer.
///
/// Polygon outlines are stored as serde JSON of [`geo::Polygon`]; point
/// locations as nullable `lon`/`lat` columns.
pub const CAMPUS_SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS osm_point (
    osm_id INTEGER PRIMARY KEY,
    name TEXT,
    lon REAL,
    lat REAL
);
CREATE TABLE IF NOT EXISTS osm_polygon (
    osm_id INTEGER PRIMARY KEY,
    name TEXT,
    geom TEXT
);
CREATE TABLE IF NOT EXISTS custom_poi (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    website TEXT NOT NULL DEFAULT '',
    location_desc TEXT,
    type TEXT,
    description TEXT NOT NULL DEFAULT '',
    parent_osm_id INTEGER,
    lon REAL,
    lat REAL
);
CREATE TABLE IF NOT EXISTS poi_alias (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    alias_text TEXT NOT NULL,
    custom_poi_id INTEGER,
    osm_id INTEGER
);
CREATE UNIQUE INDEX IF NOT EXISTS poi_alias_unique
    ON poi_alias (alias_text, IFNULL(custom_poi_id, -1), IFNULL(osm_id, -1));
";

const TABLES: [&str; 4] = ["custom_poi", "osm_point", "osm_polygon", "poi_alias"];

const CUSTOM_POI_COLUMNS: &str =
    "id, name, website, location_desc, type, description, parent_osm_id, lon, lat";

/// Error raised when opening a SQLite campus database.
#[derive(Debug, Error)]
pub enum SqliteCampusStoreError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A required table is absent.
    #[error("SQLite database at {path} has no {table} table")]
    MissingTable {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Name of the missing table.
        table: &'static str,
    },
    /// Generic SQLite error while inspecting the schema.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

/// Read-only campus store backed by a SQLite database.
pub struct SqliteCampusStore {
    connection: Connection,
    path: PathBuf,
}

impl fmt::Debug for SqliteCampusStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteCampusStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SqliteCampusStore {
    /// Open a database written by the snapshot importer.
    pub fn open<P>(database_path: P) -> Result<Self, SqliteCampusStoreError>
    where
        P: AsRef<Path>,
    {
        let database_path = database_path.as_ref();
        let connection =
            Connection::open_with_flags(database_path, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(
                |source| SqliteCampusStoreError::OpenDatabase {
                    path: database_path.to_path_buf(),
                    source,
                },
            )?;
        ensure_tables_exist(&connection, database_path)?;
        Ok(Self {
            connection,
            path: database_path.to_path_buf(),
        })
    }

    /// Location of the database on disk.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn query<T, P>(
        &self,
        operation: &'static str,
        sql: &str,
        params: P,
        map: fn(&Row<'_>) -> rusqlite::Result<T>,
    ) -> Result<Vec<T>, StoreError>
    where
        P: Params,
    {
        let unavailable = |source| StoreError::unavailable(operation, source);
        let mut statement = self.connection.prepare_cached(sql).map_err(unavailable)?;
        let rows = statement.query_map(params, map).map_err(unavailable)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(unavailable)
    }

    fn query_one<T, P>(
        &self,
        operation: &'static str,
        sql: &str,
        params: P,
        map: fn(&Row<'_>) -> rusqlite::Result<T>,
    ) -> Result<Option<T>, StoreError>
    where
        P: Params,
    {
        let mut statement = self
            .connection
            .prepare_cached(sql)
            .map_err(|source| StoreError::unavailable(operation, source))?;
        statement
            .query_row(params, map)
            .optional()
            .map_err(|source| StoreError::unavailable(operation, source))
    }
}

fn ensure_tables_exist(
    connection: &Connection,
    path: &Path,
) -> Result<(), SqliteCampusStoreError> {
    let mut statement =
        connection.prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1")?;
    for table in TABLES {
        if !statement.exists([table])? {
            return Err(SqliteCampusStoreError::MissingTable {
                path: path.to_path_buf(),
                table,
            });
        }
    }
    Ok(())
}

/// `LIKE` pattern matching `needle` anywhere, with wildcards escaped.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Ids above `i64::MAX` cannot be stored, so they can never be found.
fn sql_id(id: u64) -> Option<i64> {
    i64::try_from(id).ok()
}

fn point_from_columns(
    table: &'static str,
    id: u64,
    lon: Option<f64>,
    lat: Option<f64>,
) -> Result<Option<Point<f64>>, StoreError> {
    match (lon, lat) {
        (Some(x), Some(y)) => Ok(Some(Point::new(x, y))),
        (None, None) => Ok(None),
        _ => Err(StoreError::CorruptRecord {
            table,
            id,
            message: "only one of lon/lat is set".into(),
        }),
    }
}

/// Decode fetched rows, dropping any that fail with a warning.
fn decode_rows<R, T>(rows: Vec<R>, decode: fn(R) -> Result<T, StoreError>) -> Vec<T> {
    rows.into_iter()
        .filter_map(|row| match decode(row) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!("skipping row: {err}");
                None
            }
        })
        .collect()
}

struct OsmPointRow {
    id: u64,
    name: Option<String>,
    lon: Option<f64>,
    lat: Option<f64>,
}

impl OsmPointRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            lon: row.get(2)?,
            lat: row.get(3)?,
        })
    }

    fn into_record(self) -> Result<OsmPoint, StoreError> {
        let geometry = point_from_columns("osm_point", self.id, self.lon, self.lat)?;
        Ok(OsmPoint::new(self.id, self.name, geometry))
    }
}

struct OsmPolygonRow {
    id: u64,
    name: Option<String>,
    geom: Option<String>,
}

impl OsmPolygonRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            geom: row.get(2)?,
        })
    }

    fn into_record(self) -> Result<OsmPolygon, StoreError> {
        let geometry = self
            .geom
            .as_deref()
            .map(serde_json::from_str::<Polygon<f64>>)
            .transpose()
            .map_err(|err| StoreError::CorruptRecord {
                table: "osm_polygon",
                id: self.id,
                message: err.to_string(),
            })?;
        Ok(OsmPolygon::new(self.id, self.name, geometry))
    }
}

struct CustomPoiRow {
    poi: CustomPoi,
    lon: Option<f64>,
    lat: Option<f64>,
}

impl CustomPoiRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let mut poi = CustomPoi::new(row.get(0)?, row.get::<_, String>(1)?);
        poi.website = row.get(2)?;
        poi.location_description = row.get(3)?;
        poi.kind = row.get(4)?;
        poi.description = row.get(5)?;
        poi.parent_osm_object_id = row.get(6)?;
        Ok(Self {
            poi,
            lon: row.get(7)?,
            lat: row.get(8)?,
        })
    }

    fn into_record(self) -> Result<CustomPoi, StoreError> {
        let Self { mut poi, lon, lat } = self;
        poi.coordinate = point_from_columns("custom_poi", poi.id, lon, lat)?;
        Ok(poi)
    }
}

fn alias_from_row(row: &Row<'_>) -> rusqlite::Result<Alias> {
    Ok(Alias {
        alias_text: row.get(0)?,
        custom_poi_id: row.get(1)?,
        osm_object_id: row.get(2)?,
    })
}

impl CampusStore for SqliteCampusStore {
    fn custom_poi(&self, id: u64) -> Result<Option<CustomPoi>, StoreError> {
        let Some(key) = sql_id(id) else {
            return Ok(None);
        };
        let sql = format!("SELECT {CUSTOM_POI_COLUMNS} FROM custom_poi WHERE id = ?1");
        self.query_one("custom_poi", &sql, [key], CustomPoiRow::from_row)?
            .map(CustomPoiRow::into_record)
            .transpose()
    }

    fn osm_point(&self, id: u64) -> Result<Option<OsmPoint>, StoreError> {
        let Some(key) = sql_id(id) else {
            return Ok(None);
        };
        self.query_one(
            "osm_point",
            "SELECT osm_id, name, lon, lat FROM osm_point WHERE osm_id = ?1",
            [key],
            OsmPointRow::from_row,
        )?
        .map(OsmPointRow::into_record)
        .transpose()
    }

    fn osm_polygon(&self, id: u64) -> Result<Option<OsmPolygon>, StoreError> {
        let Some(key) = sql_id(id) else {
            return Ok(None);
        };
        self.query_one(
            "osm_polygon",
            "SELECT osm_id, name, geom FROM osm_polygon WHERE osm_id = ?1",
            [key],
            OsmPolygonRow::from_row,
        )?
        .map(OsmPolygonRow::into_record)
        .transpose()
    }

    fn custom_pois_named(&self, needle: &str) -> Result<Vec<CustomPoi>, StoreError> {
        let sql = format!(
            "SELECT {CUSTOM_POI_COLUMNS} FROM custom_poi \
             WHERE name LIKE ?1 ESCAPE '\\' ORDER BY id"
        );
        let rows = self.query(
            "custom_pois_named",
            &sql,
            [like_pattern(needle)],
            CustomPoiRow::from_row,
        )?;
        Ok(decode_rows(rows, CustomPoiRow::into_record))
    }

    fn osm_points_named(&self, needle: &str) -> Result<Vec<OsmPoint>, StoreError> {
        let rows = self.query(
            "osm_points_named",
            "SELECT osm_id, name, lon, lat FROM osm_point \
             WHERE name LIKE ?1 ESCAPE '\\' ORDER BY osm_id",
            [like_pattern(needle)],
            OsmPointRow::from_row,
        )?;
        Ok(decode_rows(rows, OsmPointRow::into_record))
    }

    fn osm_polygons_named(&self, needle: &str) -> Result<Vec<OsmPolygon>, StoreError> {
        let rows = self.query(
            "osm_polygons_named",
            "SELECT osm_id, name, geom FROM osm_polygon \
             WHERE name LIKE ?1 ESCAPE '\\' ORDER BY osm_id",
            [like_pattern(needle)],
            OsmPolygonRow::from_row,
        )?;
        Ok(decode_rows(rows, OsmPolygonRow::into_record))
    }

    fn aliases_matching(&self, needle: &str) -> Result<Vec<Alias>, StoreError> {
        self.query(
            "aliases_matching",
            "SELECT alias_text, custom_poi_id, osm_id FROM poi_alias \
             WHERE alias_text LIKE ?1 ESCAPE '\\' ORDER BY alias_text, id",
            [like_pattern(needle)],
            alias_from_row,
        )
    }

    fn all_custom_pois(&self) -> Result<Vec<CustomPoi>, StoreError> {
        let sql = format!("SELECT {CUSTOM_POI_COLUMNS} FROM custom_poi ORDER BY id");
        let rows = self.query("all_custom_pois", &sql, [], CustomPoiRow::from_row)?;
        Ok(decode_rows(rows, CustomPoiRow::into_record))
    }
}
