//! Resolve records to a single representative coordinate.
//!
//! Explicit coordinates win. POIs that only reference a parent building get
//! a point sampled from the building's interior. Everything else is
//! unresolvable, which is reported as `Ok(None)` rather than an error.

use geo::Point;
use rand::Rng;
use thiserror::Error;

use crate::sampler::{DegenerateGeometryError, sample_interior};
use crate::{CustomPoi, OsmPoint, OsmPolygon, StoreError};

/// Errors from [`resolve_custom_poi`].
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The parent polygon has no usable area.
    #[error("parent polygon {parent_id} is degenerate: {source}")]
    Degenerate {
        /// Identifier of the polygon that failed to sample.
        parent_id: u64,
        /// Reason the polygon was rejected.
        #[source]
        source: DegenerateGeometryError,
    },
    /// Looking up the parent polygon failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Determine the representative coordinate of a custom POI.
///
/// `polygon_lookup` fetches the parent polygon by id; returning `Ok(None)`
/// for a missing parent makes the POI unresolvable without failing.
///
/// # Examples
/// ```
/// use geo::Point;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use quadrant_core::{CustomPoi, resolve_custom_poi};
///
/// let library = CustomPoi::new(1, "Library")
///     .with_coordinate(Point::new(-76.71, 39.25))
///     .with_parent(500);
/// let mut rng = StdRng::seed_from_u64(1);
/// let resolved = resolve_custom_poi(&library, |_| Ok(None), &mut rng)?;
/// assert_eq!(resolved, Some(Point::new(-76.71, 39.25)));
/// # Ok::<(), quadrant_core::ResolveError>(())
/// ```
pub fn resolve_custom_poi<F, R>(
    poi: &CustomPoi,
    mut polygon_lookup: F,
    rng: &mut R,
) -> Result<Option<Point<f64>>, ResolveError>
where
    F: FnMut(u64) -> Result<Option<OsmPolygon>, StoreError>,
    R: Rng + ?Sized,
{
    if let Some(coordinate) = poi.coordinate {
        return Ok(Some(coordinate));
    }
    let Some(parent_id) = poi.parent_osm_object_id else {
        return Ok(None);
    };
    let Some(parent) = polygon_lookup(parent_id)? else {
        return Ok(None);
    };
    resolve_osm_polygon(&parent, rng)
}

/// Sample a representative coordinate for an OSM polygon.
///
/// Polygons without geometry resolve to `None`.
pub fn resolve_osm_polygon<R>(
    polygon: &OsmPolygon,
    rng: &mut R,
) -> Result<Option<Point<f64>>, ResolveError>
where
    R: Rng + ?Sized,
{
    let Some(geometry) = polygon.geometry.as_ref() else {
        return Ok(None);
    };
    sample_interior(geometry, rng)
        .map(Some)
        .map_err(|source| ResolveError::Degenerate {
            parent_id: polygon.id,
            source,
        })
}

/// The coordinate of an OSM point, if it has one.
#[must_use]
pub const fn resolve_osm_point(point: &OsmPoint) -> Option<Point<f64>> {
    point.geometry
}
