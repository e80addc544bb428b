//! Resolved features produced by searches and listings.

use std::fmt;

use geo::Point;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Table a resolved feature came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// A curated custom POI.
    Custom,
    /// An imported OSM point.
    OsmPoint,
    /// An imported OSM polygon.
    OsmPolygon,
}

impl SourceKind {
    /// Label used in the `source` property.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Custom => "custom",
            Self::OsmPoint => "osm_point",
            Self::OsmPolygon => "osm_polygon",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record placed at a single coordinate, with display attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFeature {
    /// Representative coordinate (`x = longitude`, `y = latitude`).
    pub coordinate: Point<f64>,
    /// Table the record came from.
    pub source_kind: SourceKind,
    /// Properties exported with the feature.
    pub attributes: Map<String, Value>,
}

impl ResolvedFeature {
    /// Feature with the minimal search attribute set: `id`, `name`, `source`.
    #[must_use]
    pub fn summary(
        coordinate: Point<f64>,
        source_kind: SourceKind,
        id: u64,
        name: Option<&str>,
    ) -> Self {
        let mut attributes = Map::new();
        attributes.insert("id".into(), Value::from(id));
        attributes.insert("name".into(), name.map_or(Value::Null, Value::from));
        attributes.insert("source".into(), Value::from(source_kind.as_str()));
        Self {
            coordinate,
            source_kind,
            attributes,
        }
    }

    /// The `id` attribute, when it is an unsigned integer.
    #[must_use]
    pub fn id(&self) -> Option<u64> {
        self.attributes.get("id").and_then(Value::as_u64)
    }

    /// The `name` attribute, when it is a string.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.attributes.get("name").and_then(Value::as_str)
    }
}
