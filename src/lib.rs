//! Facade crate for the Quadrant campus map engine.
//!
//! This crate re-exports the core domain types and exposes the SQLite store
//! and HTTP directions provider behind feature flags.

#![forbid(unsafe_code)]

pub use quadrant_core::{
    Alias, AliasTarget, CampusSnapshot, CampusStore, CustomPoi, DegenerateGeometryError,
    Directory, Feature, FeatureCollection, OsmPoint, OsmPolygon, PointGeometry, ResolveError,
    ResolvedFeature, RouteEndpoints, RouteError, RouteProvider, SourceKind, StoreError,
    build_feature_collection, sample_interior,
};

#[cfg(feature = "store-sqlite")]
pub use quadrant_core::{SqliteCampusStore, SqliteCampusStoreError};

#[cfg(feature = "routing-http")]
pub use quadrant_data::{
    HttpRouteProvider, HttpRouteProviderConfig, ProviderBuildError, load_snapshot,
    persist_snapshot,
};
