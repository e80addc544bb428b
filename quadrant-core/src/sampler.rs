//! Interior point sampling for polygons.
//!
//! A polygon has no single "location", so POIs that only reference a parent
//! building receive a point drawn uniformly from the building's area.

use geo::{Area, BoundingRect, Contains, Point, Polygon, Rect};
use rand::Rng;
use rand::distributions::{Distribution, Uniform};
use thiserror::Error;

/// Errors returned by [`sample_interior`] for polygons without usable area.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DegenerateGeometryError {
    /// The polygon has no coordinates.
    #[error("polygon has no extent")]
    Empty,
    /// The polygon extent contains NaN or infinite bounds.
    #[error("polygon extent is not finite")]
    NonFiniteExtent,
    /// The extent collapses on at least one axis.
    #[error("polygon extent collapses to zero (width {width}, height {height})")]
    ZeroExtent {
        /// Extent along the longitude axis.
        width: f64,
        /// Extent along the latitude axis.
        height: f64,
    },
    /// The extent is positive but the ring encloses no area.
    #[error("polygon encloses zero area")]
    ZeroArea,
}

/// Polygons covering less of their bounding box than this are treated as
/// having no area; rounding keeps collinear rings from measuring exactly zero.
/// Rejection sampling needs about `1 / ratio` draws, so slivers below it are
/// refused rather than sampled.
const MIN_FILL_RATIO: f64 = 1.0e-6;

/// Draw a point uniformly distributed over the interior of `polygon`.
///
/// Candidates are drawn independently from the closed ranges
/// `[min_x, max_x]` and `[min_y, max_y]` of the polygon extent and rejected
/// until one lies inside the polygon. Boundary points are rejected.
///
/// Polygons whose extent or area is (numerically) zero fail with
/// [`DegenerateGeometryError`] before any sampling starts, so the loop only
/// runs for polygons a candidate can land in.
///
/// # Examples
/// ```
/// use geo::{Contains, polygon};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use quadrant_core::sample_interior;
///
/// let square = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 1.0)];
/// let mut rng = StdRng::seed_from_u64(7);
/// let point = sample_interior(&square, &mut rng)?;
/// assert!(square.contains(&point));
/// # Ok::<(), quadrant_core::DegenerateGeometryError>(())
/// ```
pub fn sample_interior<R>(
    polygon: &Polygon<f64>,
    rng: &mut R,
) -> Result<Point<f64>, DegenerateGeometryError>
where
    R: Rng + ?Sized,
{
    let extent = polygon
        .bounding_rect()
        .ok_or(DegenerateGeometryError::Empty)?;
    let (min, max) = (extent.min(), extent.max());
    if ![min.x, min.y, max.x, max.y].iter().all(|v| v.is_finite()) {
        return Err(DegenerateGeometryError::NonFiniteExtent);
    }
    if extent.width() <= 0.0 || extent.height() <= 0.0 {
        return Err(DegenerateGeometryError::ZeroExtent {
            width: extent.width(),
            height: extent.height(),
        });
    }
    if covers_negligible_area(polygon, &extent) {
        return Err(DegenerateGeometryError::ZeroArea);
    }

    let xs = Uniform::new_inclusive(min.x, max.x);
    let ys = Uniform::new_inclusive(min.y, max.y);
    loop {
        let candidate = Point::new(xs.sample(rng), ys.sample(rng));
        if polygon.contains(&candidate) {
            return Ok(candidate);
        }
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "fill ratio compares the ring area with its bounding box area"
)]
fn covers_negligible_area(polygon: &Polygon<f64>, extent: &Rect<f64>) -> bool {
    polygon.unsigned_area() <= extent.width() * extent.height() * MIN_FILL_RATIO
}
