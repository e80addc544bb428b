//! Data access traits for campus records.
//!
//! The `CampusStore` trait is the read-only interface the resolver and the
//! search aggregator consume. A missing record is `Ok(None)`; errors are
//! reserved for a store that cannot answer at all.

use thiserror::Error;

use crate::{Alias, CustomPoi, OsmPoint, OsmPolygon};

#[cfg(feature = "store-sqlite")]
mod sqlite;

#[cfg(feature = "store-sqlite")]
pub use sqlite::{CAMPUS_SCHEMA_SQL, SqliteCampusStore, SqliteCampusStoreError};

/// Failure reported by a [`CampusStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be queried.
    #[error("campus store unavailable: {message}")]
    Unavailable {
        /// Description of the failed operation.
        message: String,
        /// Underlying backend error.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
    /// A row exists but could not be decoded into a record.
    #[error("corrupt {table} record {id}: {message}")]
    CorruptRecord {
        /// Table holding the row.
        table: &'static str,
        /// Identifier of the row.
        id: u64,
        /// Description of the decoding failure.
        message: String,
    },
}

impl StoreError {
    /// Wrap a backend error as [`StoreError::Unavailable`].
    pub fn unavailable<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Unavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Read-only access to the campus tables.
///
/// Name filters are case-insensitive substring matches and return records in
/// ascending id order. Records without a name never match a name filter.
/// A backend skips rows it cannot decode when filtering, and reports them as
/// [`StoreError::CorruptRecord`] when fetched by id.
///
/// # Examples
///
/// ```rust
/// use geo::Point;
/// use quadrant_core::{CampusStore, CustomPoi, test_support::MemoryStore};
///
/// let store = MemoryStore::default()
///     .with_custom_poi(CustomPoi::new(1, "Library").with_coordinate(Point::new(-76.71, 39.25)));
///
/// let found = store.custom_pois_named("lib")?;
/// assert_eq!(found.len(), 1);
/// assert!(store.custom_poi(2)?.is_none());
/// # Ok::<(), quadrant_core::StoreError>(())
/// ```
pub trait CampusStore {
    /// Fetch a custom POI by id.
    fn custom_poi(&self, id: u64) -> Result<Option<CustomPoi>, StoreError>;

    /// Fetch an OSM point by id.
    fn osm_point(&self, id: u64) -> Result<Option<OsmPoint>, StoreError>;

    /// Fetch an OSM polygon by id.
    fn osm_polygon(&self, id: u64) -> Result<Option<OsmPolygon>, StoreError>;

    /// Custom POIs whose name contains `needle`.
    fn custom_pois_named(&self, needle: &str) -> Result<Vec<CustomPoi>, StoreError>;

    /// OSM points whose name contains `needle`.
    fn osm_points_named(&self, needle: &str) -> Result<Vec<OsmPoint>, StoreError>;

    /// OSM polygons whose name contains `needle`.
    fn osm_polygons_named(&self, needle: &str) -> Result<Vec<OsmPolygon>, StoreError>;

    /// Aliases whose text contains `needle`, in ascending text order.
    fn aliases_matching(&self, needle: &str) -> Result<Vec<Alias>, StoreError>;

    /// Every custom POI, in ascending id order.
    fn all_custom_pois(&self) -> Result<Vec<CustomPoi>, StoreError>;
}

impl<S> CampusStore for &S
where
    S: CampusStore + ?Sized,
{
    fn custom_poi(&self, id: u64) -> Result<Option<CustomPoi>, StoreError> {
        (**self).custom_poi(id)
    }

    fn osm_point(&self, id: u64) -> Result<Option<OsmPoint>, StoreError> {
        (**self).osm_point(id)
    }

    fn osm_polygon(&self, id: u64) -> Result<Option<OsmPolygon>, StoreError> {
        (**self).osm_polygon(id)
    }

    fn custom_pois_named(&self, needle: &str) -> Result<Vec<CustomPoi>, StoreError> {
        (**self).custom_pois_named(needle)
    }

    fn osm_points_named(&self, needle: &str) -> Result<Vec<OsmPoint>, StoreError> {
        (**self).osm_points_named(needle)
    }

    fn osm_polygons_named(&self, needle: &str) -> Result<Vec<OsmPolygon>, StoreError> {
        (**self).osm_polygons_named(needle)
    }

    fn aliases_matching(&self, needle: &str) -> Result<Vec<Alias>, StoreError> {
        (**self).aliases_matching(needle)
    }

    fn all_custom_pois(&self) -> Result<Vec<CustomPoi>, StoreError> {
        (**self).all_custom_pois()
    }
}

/// Case-insensitive substring test shared by in-process stores.
///
/// An empty needle matches every name.
#[must_use]
pub fn name_contains(name: &str, needle: &str) -> bool {
    name.to_lowercase().contains(&needle.to_lowercase())
}
