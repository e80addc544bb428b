//! Data access adapters for the Quadrant campus map.
//!
//! Responsibilities:
//! - Import campus snapshots into the SQLite layout read by
//!   [`quadrant_core::SqliteCampusStore`].
//! - Provide the HTTP directions adapter behind
//!   [`quadrant_core::RouteProvider`].
//!
//! Boundaries:
//! - Do not encode domain rules (live in `quadrant-core`).
//! - Keep blocking I/O off async executors.
//!
//! Invariants:
//! - No global mutable state; credentials arrive through configuration.

pub mod routing;
pub mod snapshot;

pub use routing::{
    DEFAULT_BASE_URL, DEFAULT_PROFILE, DEFAULT_USER_AGENT, HttpRouteProvider,
    HttpRouteProviderConfig, ProviderBuildError,
};
pub use snapshot::{LoadSnapshotError, PersistSnapshotError, load_snapshot, persist_snapshot};
