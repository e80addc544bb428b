//! Walking directions between two coordinates.
//!
//! [`RouteEndpoints`] validates the `"lon,lat"` text supplied by callers and
//! the [`RouteProvider`] trait abstracts the directions service. The body
//! returned by the service is handed back verbatim as JSON.

mod endpoints;
mod error;
mod provider;

pub use endpoints::RouteEndpoints;
pub use error::RouteError;
pub use provider::RouteProvider;
