//! In-memory `CampusStore` implementations used by unit and behaviour tests.
//!
//! `MemoryStore` is always compiled so doctests and integration tests can
//! reach it; the failing stores need `cfg(test)` or the `test-support`
//! feature.

use crate::store::name_contains;
use crate::{Alias, CampusSnapshot, CampusStore, CustomPoi, OsmPoint, OsmPolygon, StoreError};

/// In-memory `CampusStore` implementation used in tests.
///
/// The store performs a linear scan and is intended only for small datasets.
#[derive(Default, Debug, Clone)]
pub struct MemoryStore {
    snapshot: CampusSnapshot,
}

impl MemoryStore {
    /// Create a store holding every record of `snapshot`.
    #[must_use]
    pub const fn from_snapshot(snapshot: CampusSnapshot) -> Self {
        Self { snapshot }
    }

    /// Add a custom POI.
    #[must_use]
    pub fn with_custom_poi(mut self, poi: CustomPoi) -> Self {
        self.snapshot.custom_pois.push(poi);
        self
    }

    /// Add an OSM point.
    #[must_use]
    pub fn with_osm_point(mut self, point: OsmPoint) -> Self {
        self.snapshot.osm_points.push(point);
        self
    }

    /// Add an OSM polygon.
    #[must_use]
    pub fn with_osm_polygon(mut self, polygon: OsmPolygon) -> Self {
        self.snapshot.osm_polygons.push(polygon);
        self
    }

    /// Add an alias.
    #[must_use]
    pub fn with_alias(mut self, alias: Alias) -> Self {
        self.snapshot.aliases.push(alias);
        self
    }

    /// Records held by the store.
    #[must_use]
    pub const fn snapshot(&self) -> &CampusSnapshot {
        &self.snapshot
    }
}

fn named<T, F>(records: &[T], needle: &str, name: F, id: fn(&T) -> u64) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> Option<&str>,
{
    let mut found: Vec<T> = records
        .iter()
        .filter(|record| name(*record).is_some_and(|n| name_contains(n, needle)))
        .cloned()
        .collect();
    found.sort_by_key(id);
    found
}

impl CampusStore for MemoryStore {
    fn custom_poi(&self, id: u64) -> Result<Option<CustomPoi>, StoreError> {
        Ok(self
            .snapshot
            .custom_pois
            .iter()
            .find(|poi| poi.id == id)
            .cloned())
    }

    fn osm_point(&self, id: u64) -> Result<Option<OsmPoint>, StoreError> {
        Ok(self
            .snapshot
            .osm_points
            .iter()
            .find(|point| point.id == id)
            .cloned())
    }

    fn osm_polygon(&self, id: u64) -> Result<Option<OsmPolygon>, StoreError> {
        Ok(self
            .snapshot
            .osm_polygons
            .iter()
            .find(|polygon| polygon.id == id)
            .cloned())
    }

    fn custom_pois_named(&self, needle: &str) -> Result<Vec<CustomPoi>, StoreError> {
        Ok(named(
            &self.snapshot.custom_pois,
            needle,
            |poi| Some(poi.name.as_str()),
            |poi| poi.id,
        ))
    }

    fn osm_points_named(&self, needle: &str) -> Result<Vec<OsmPoint>, StoreError> {
        Ok(named(
            &self.snapshot.osm_points,
            needle,
            |point| point.name.as_deref(),
            |point| point.id,
        ))
    }

    fn osm_polygons_named(&self, needle: &str) -> Result<Vec<OsmPolygon>, StoreError> {
        Ok(named(
            &self.snapshot.osm_polygons,
            needle,
            |polygon| polygon.name.as_deref(),
            |polygon| polygon.id,
        ))
    }

    fn aliases_matching(&self, needle: &str) -> Result<Vec<Alias>, StoreError> {
        let mut found: Vec<Alias> = self
            .snapshot
            .aliases
            .iter()
            .filter(|alias| name_contains(&alias.alias_text, needle))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.alias_text.cmp(&b.alias_text));
        Ok(found)
    }

    fn all_custom_pois(&self) -> Result<Vec<CustomPoi>, StoreError> {
        self.custom_pois_named("")
    }
}

/// `CampusStore` whose every query fails with [`StoreError::Unavailable`].
#[cfg(any(test, feature = "test-support"))]
#[derive(Default, Debug, Copy, Clone)]
pub struct UnavailableStore;

#[cfg(any(test, feature = "test-support"))]
impl UnavailableStore {
    fn fail<T>(operation: &str) -> Result<T, StoreError> {
        Err(StoreError::Unavailable {
            message: format!("{operation} failed: store offline"),
            source: None,
        })
    }
}

#[cfg(any(test, feature = "test-support"))]
impl CampusStore for UnavailableStore {
    fn custom_poi(&self, _id: u64) -> Result<Option<CustomPoi>, StoreError> {
        Self::fail("custom_poi")
    }

    fn osm_point(&self, _id: u64) -> Result<Option<OsmPoint>, StoreError> {
        Self::fail("osm_point")
    }

    fn osm_polygon(&self, _id: u64) -> Result<Option<OsmPolygon>, StoreError> {
        Self::fail("osm_polygon")
    }

    fn custom_pois_named(&self, _needle: &str) -> Result<Vec<CustomPoi>, StoreError> {
        Self::fail("custom_pois_named")
    }

    fn osm_points_named(&self, _needle: &str) -> Result<Vec<OsmPoint>, StoreError> {
        Self::fail("osm_points_named")
    }

    fn osm_polygons_named(&self, _needle: &str) -> Result<Vec<OsmPolygon>, StoreError> {
        Self::fail("osm_polygons_named")
    }

    fn aliases_matching(&self, _needle: &str) -> Result<Vec<Alias>, StoreError> {
        Self::fail("aliases_matching")
    }

    fn all_custom_pois(&self) -> Result<Vec<CustomPoi>, StoreError> {
        Self::fail("all_custom_pois")
    }
}
