//! GeoJSON feature collections.
//!
//! Only the subset the map client consumes is modelled: a collection of
//! features with point geometry and free-form properties.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ResolvedFeature;

/// A GeoJSON `FeatureCollection`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    /// Features in output order.
    pub features: Vec<Feature>,
}

/// A GeoJSON `Feature` with point geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    /// Location of the feature.
    pub geometry: PointGeometry,
    /// Attributes copied from the resolved feature.
    pub properties: Map<String, Value>,
}

/// A GeoJSON `Point` geometry; `coordinates` is `[longitude, latitude]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Point")]
pub struct PointGeometry {
    /// `[longitude, latitude]`, without altitude.
    pub coordinates: [f64; 2],
}

impl From<ResolvedFeature> for Feature {
    fn from(feature: ResolvedFeature) -> Self {
        Self {
            geometry: PointGeometry {
                coordinates: [feature.coordinate.x(), feature.coordinate.y()],
            },
            properties: feature.attributes,
        }
    }
}

impl FeatureCollection {
    /// Collect resolved features, keeping their order.
    #[must_use]
    pub fn from_features<I>(features: I) -> Self
    where
        I: IntoIterator<Item = ResolvedFeature>,
    {
        Self {
            features: features.into_iter().map(Feature::from).collect(),
        }
    }
}

impl FromIterator<ResolvedFeature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = ResolvedFeature>>(iter: I) -> Self {
        Self::from_features(iter)
    }
}

/// Assemble resolved features into a feature collection.
///
/// # Examples
/// ```
/// use geo::Point;
/// use quadrant_core::{ResolvedFeature, SourceKind, build_feature_collection};
///
/// let library = ResolvedFeature::summary(
///     Point::new(-76.71, 39.25),
///     SourceKind::Custom,
///     1,
///     Some("Library"),
/// );
/// let json = serde_json::to_value(build_feature_collection(vec![library]))?;
/// assert_eq!(json["type"], "FeatureCollection");
/// assert_eq!(json["features"][0]["geometry"]["coordinates"][0], -76.71);
/// assert_eq!(json["features"][0]["properties"]["source"], "custom");
/// # Ok::<(), serde_json::Error>(())
/// ```
pub fn build_feature_collection<I>(features: I) -> FeatureCollection
where
    I: IntoIterator<Item = ResolvedFeature>,
{
    FeatureCollection::from_features(features)
}
