//! Search and listing across custom POIs, OSM points and OSM polygons.
//!
//! Direct name matches and alias matches are merged per record kind, each
//! candidate is resolved to a coordinate, and records that cannot be placed
//! are dropped. An unavailable store aborts the call; a single bad or
//! undecodable record never does.

use std::collections::HashSet;

use log::{debug, warn};
use rand::Rng;
use serde_json::{Map, Value};

use crate::alias::{AliasTargets, lookup_alias_targets};
use crate::resolve::{ResolveError, resolve_custom_poi, resolve_osm_point, resolve_osm_polygon};
use crate::{CampusStore, CustomPoi, OsmPoint, OsmPolygon, ResolvedFeature, SourceKind, StoreError};

/// Search and listing entry point over a [`CampusStore`].
///
/// The directory holds no state of its own; each call reads the store and
/// returns freshly resolved features.
///
/// # Examples
/// ```
/// use geo::Point;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use quadrant_core::{CustomPoi, Directory, test_support::MemoryStore};
///
/// let store = MemoryStore::default()
///     .with_custom_poi(CustomPoi::new(1, "Library").with_coordinate(Point::new(-76.71, 39.25)));
/// let directory = Directory::new(&store);
///
/// let features = directory.search("Lib", &mut StdRng::seed_from_u64(0))?;
/// assert_eq!(features.len(), 1);
/// assert_eq!(features[0].coordinate, Point::new(-76.71, 39.25));
/// # Ok::<(), quadrant_core::StoreError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Directory<S> {
    store: S,
}

/// Candidates for one record kind: direct matches first, then alias-only
/// matches, with no id repeated.
#[derive(Debug)]
struct Candidates<T> {
    records: Vec<T>,
    seen: HashSet<u64>,
}

impl<T> Candidates<T> {
    fn direct(records: Vec<T>, id: fn(&T) -> u64) -> Self {
        let mut candidates = Self {
            records: Vec::with_capacity(records.len()),
            seen: HashSet::new(),
        };
        for record in records {
            candidates.push(record, id);
        }
        candidates
    }

    fn contains(&self, id: u64) -> bool {
        self.seen.contains(&id)
    }

    fn push(&mut self, record: T, id: fn(&T) -> u64) {
        if self.seen.insert(id(&record)) {
            self.records.push(record);
        }
    }
}

impl<S> Directory<S>
where
    S: CampusStore,
{
    /// Wrap a store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Find records whose name or alias contains `query`, ignoring case.
    ///
    /// An empty query matches every named record. Features carry the
    /// `id`, `name` and `source` attributes. Output lists custom POIs, then
    /// OSM points, then OSM polygons; within a kind, direct matches come in
    /// store order followed by alias-only matches in alias order.
    pub fn search<R>(&self, query: &str, rng: &mut R) -> Result<Vec<ResolvedFeature>, StoreError>
    where
        R: Rng + ?Sized,
    {
        let targets = lookup_alias_targets(&self.store, query)?;
        let custom = self.custom_candidates(query, &targets)?;
        let points = self.point_candidates(query, &targets)?;
        let polygons = self.polygon_candidates(query, &targets)?;
        debug!(
            "search {query:?}: {} custom, {} point and {} polygon candidates",
            custom.records.len(),
            points.records.len(),
            polygons.records.len()
        );

        let mut features = Vec::new();
        for poi in &custom.records {
            if let Some(coordinate) = self.place_custom_poi(poi, rng)? {
                features.push(ResolvedFeature::summary(
                    coordinate,
                    SourceKind::Custom,
                    poi.id,
                    Some(&poi.name),
                ));
            }
        }
        features.extend(points.records.iter().filter_map(|point| {
            resolve_osm_point(point).map(|coordinate| {
                ResolvedFeature::summary(
                    coordinate,
                    SourceKind::OsmPoint,
                    point.id,
                    point.name.as_deref(),
                )
            })
        }));
        for polygon in &polygons.records {
            if let Some(coordinate) = place(resolve_osm_polygon(polygon, rng))? {
                features.push(ResolvedFeature::summary(
                    coordinate,
                    SourceKind::OsmPolygon,
                    polygon.id,
                    polygon.name.as_deref(),
                ));
            }
        }
        Ok(features)
    }

    /// Every placeable custom POI with its full attribute set.
    ///
    /// Attributes are `id`, `name`, `location_description`, `type`,
    /// `description` and `website`; absent optional values are `null`.
    pub fn listing<R>(&self, rng: &mut R) -> Result<Vec<ResolvedFeature>, StoreError>
    where
        R: Rng + ?Sized,
    {
        let pois = self.store.all_custom_pois()?;
        let mut features = Vec::with_capacity(pois.len());
        for poi in pois {
            match self.place_custom_poi(&poi, rng)? {
                Some(coordinate) => features.push(ResolvedFeature {
                    coordinate,
                    source_kind: SourceKind::Custom,
                    attributes: listing_attributes(poi),
                }),
                None => debug!("custom POI {} has no resolvable location", poi.id),
            }
        }
        Ok(features)
    }

    fn custom_candidates(
        &self,
        query: &str,
        targets: &AliasTargets,
    ) -> Result<Candidates<CustomPoi>, StoreError> {
        let mut candidates = Candidates::direct(self.store.custom_pois_named(query)?, custom_id);
        for &id in &targets.custom_poi_ids {
            if candidates.contains(id) {
                continue;
            }
            if let Some(poi) = skip_corrupt(self.store.custom_poi(id))? {
                candidates.push(poi, custom_id);
            }
        }
        Ok(candidates)
    }

    fn point_candidates(
        &self,
        query: &str,
        targets: &AliasTargets,
    ) -> Result<Candidates<OsmPoint>, StoreError> {
        let mut candidates = Candidates::direct(self.store.osm_points_named(query)?, point_id);
        for &id in &targets.osm_object_ids {
            if candidates.contains(id) {
                continue;
            }
            if let Some(point) = skip_corrupt(self.store.osm_point(id))? {
                candidates.push(point, point_id);
            }
        }
        Ok(candidates)
    }

    fn polygon_candidates(
        &self,
        query: &str,
        targets: &AliasTargets,
    ) -> Result<Candidates<OsmPolygon>, StoreError> {
        let mut candidates =
            Candidates::direct(self.store.osm_polygons_named(query)?, polygon_id);
        for &id in &targets.osm_object_ids {
            if candidates.contains(id) {
                continue;
            }
            if let Some(polygon) = skip_corrupt(self.store.osm_polygon(id))? {
                candidates.push(polygon, polygon_id);
            }
        }
        Ok(candidates)
    }

    fn place_custom_poi<R>(
        &self,
        poi: &CustomPoi,
        rng: &mut R,
    ) -> Result<Option<geo::Point<f64>>, StoreError>
    where
        R: Rng + ?Sized,
    {
        place(resolve_custom_poi(
            poi,
            |id| skip_corrupt(self.store.osm_polygon(id)),
            rng,
        ))
    }
}

/// Treat an undecodable record as missing; keep availability failures.
fn skip_corrupt<T>(fetched: Result<Option<T>, StoreError>) -> Result<Option<T>, StoreError> {
    match fetched {
        Err(StoreError::CorruptRecord { table, id, message }) => {
            warn!("skipping corrupt {table} record {id}: {message}");
            Ok(None)
        }
        other => other,
    }
}

/// Turn degenerate geometry into a dropped record; keep store failures.
fn place(
    resolved: Result<Option<geo::Point<f64>>, ResolveError>,
) -> Result<Option<geo::Point<f64>>, StoreError> {
    match resolved {
        Ok(coordinate) => Ok(coordinate),
        Err(ResolveError::Degenerate { parent_id, source }) => {
            warn!("skipping record placed by polygon {parent_id}: {source}");
            Ok(None)
        }
        Err(ResolveError::Store(err)) => Err(err),
    }
}

fn listing_attributes(poi: CustomPoi) -> Map<String, Value> {
    let mut attributes = Map::new();
    attributes.insert("id".into(), Value::from(poi.id));
    attributes.insert("name".into(), Value::from(poi.name));
    attributes.insert(
        "location_description".into(),
        poi.location_description.map_or(Value::Null, Value::from),
    );
    attributes.insert("type".into(), poi.kind.map_or(Value::Null, Value::from));
    attributes.insert("description".into(), Value::from(poi.description));
    attributes.insert("website".into(), Value::from(poi.website));
    attributes
}

const fn custom_id(poi: &CustomPoi) -> u64 {
    poi.id
}

const fn point_id(point: &OsmPoint) -> u64 {
    point.id
}

const fn polygon_id(polygon: &OsmPolygon) -> u64 {
    polygon.id
}
