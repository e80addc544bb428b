//! Core domain for the Quadrant campus map.
//!
//! Campus records come in three shapes: curated custom POIs, imported OSM
//! points, and imported OSM polygons. This crate turns those records into
//! single map coordinates, answers name searches (including alias
//! indirection), and assembles the results into GeoJSON.
//!
//! Randomness is injected: every operation that may sample a polygon takes a
//! caller-supplied [`rand::Rng`], so a fixed seed yields fixed output.

mod alias;
mod feature;
mod geojson;
mod record;
mod resolve;
pub mod routing;
mod sampler;
mod search;
pub mod store;

#[doc(hidden)]
pub mod test_support;

pub use alias::{AliasTargets, find_aliases, lookup_alias_targets};
pub use feature::{ResolvedFeature, SourceKind};
pub use geojson::{Feature, FeatureCollection, PointGeometry, build_feature_collection};
pub use record::{Alias, AliasTarget, CampusSnapshot, CustomPoi, OsmPoint, OsmPolygon};
pub use resolve::{ResolveError, resolve_custom_poi, resolve_osm_point, resolve_osm_polygon};
pub use routing::{RouteEndpoints, RouteError, RouteProvider};
pub use sampler::{DegenerateGeometryError, sample_interior};
pub use search::Directory;
pub use store::{CampusStore, StoreError};
#[cfg(feature = "store-sqlite")]
pub use store::{CAMPUS_SCHEMA_SQL, SqliteCampusStore, SqliteCampusStoreError};
