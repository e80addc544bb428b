//! Directions provider trait.

use serde_json::Value;

use super::{endpoints::RouteEndpoints, error::RouteError};

/// Fetch walking directions between two endpoints.
///
/// Implementations return the service's JSON body unchanged; callers decide
/// how much of it to interpret.
///
/// # Examples
///
/// ```rust
/// use quadrant_core::{RouteEndpoints, RouteError, RouteProvider};
/// use serde_json::{Value, json};
///
/// struct StraightLine;
///
/// impl RouteProvider for StraightLine {
///     fn directions(&self, endpoints: &RouteEndpoints) -> Result<Value, RouteError> {
///         Ok(json!({
///             "type": "LineString",
///             "coordinates": [
///                 [endpoints.start.x, endpoints.start.y],
///                 [endpoints.end.x, endpoints.end.y],
///             ],
///         }))
///     }
/// }
///
/// let endpoints = RouteEndpoints::parse("0,0", "1,1")?;
/// let body = StraightLine.directions(&endpoints)?;
/// assert_eq!(body["coordinates"][1][0], 1.0);
/// # Ok::<(), RouteError>(())
/// ```
pub trait RouteProvider {
    /// Return directions from `endpoints.start` to `endpoints.end`.
    fn directions(&self, endpoints: &RouteEndpoints) -> Result<Value, RouteError>;
}

impl<P> RouteProvider for &P
where
    P: RouteProvider + ?Sized,
{
    fn directions(&self, endpoints: &RouteEndpoints) -> Result<Value, RouteError> {
        (**self).directions(endpoints)
    }
}
