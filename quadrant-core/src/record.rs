//! Records owned by the campus store.
//!
//! Coordinates are WGS84 with `x = longitude` and `y = latitude`. The core
//! only reads these values; writes happen in the ingestion tooling.

use geo::{Point, Polygon};
use serde::{Deserialize, Serialize};

/// A point feature imported from OpenStreetMap.
///
/// # Examples
/// ```
/// use geo::Point;
/// use quadrant_core::OsmPoint;
///
/// let gate = OsmPoint::new(900, Some("Fitness Center".into()), Some(Point::new(-76.70, 39.26)));
/// assert_eq!(gate.id, 900);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsmPoint {
    /// Stable OSM identifier.
    pub id: u64,
    /// Display name, if the feature is named.
    #[serde(default)]
    pub name: Option<String>,
    /// Location of the feature.
    #[serde(default)]
    pub geometry: Option<Point<f64>>,
}

impl OsmPoint {
    /// Construct an `OsmPoint`.
    pub const fn new(id: u64, name: Option<String>, geometry: Option<Point<f64>>) -> Self {
        Self { id, name, geometry }
    }
}

/// A building or area outline imported from OpenStreetMap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsmPolygon {
    /// Stable OSM identifier.
    pub id: u64,
    /// Display name, if the feature is named.
    #[serde(default)]
    pub name: Option<String>,
    /// Outline of the feature.
    #[serde(default)]
    pub geometry: Option<Polygon<f64>>,
}

impl OsmPolygon {
    /// Construct an `OsmPolygon`.
    pub const fn new(id: u64, name: Option<String>, geometry: Option<Polygon<f64>>) -> Self {
        Self { id, name, geometry }
    }
}

/// A curated point of interest.
///
/// A POI either carries its own `coordinate` or points at a parent polygon
/// through `parent_osm_object_id`. Records with neither cannot be placed on
/// the map and are skipped by every listing.
///
/// # Examples
/// ```
/// use geo::Point;
/// use quadrant_core::CustomPoi;
///
/// let library = CustomPoi::new(1, "Library").with_coordinate(Point::new(-76.71, 39.25));
/// assert!(library.parent_osm_object_id.is_none());
/// assert_eq!(library.coordinate, Some(Point::new(-76.71, 39.25)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomPoi {
    /// Unique identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Website for the POI; empty when unknown.
    #[serde(default)]
    pub website: String,
    /// Free-text directions such as "second floor, room 210".
    #[serde(default)]
    pub location_description: Option<String>,
    /// Category label, exported as `type`.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Longer description; empty when unknown.
    #[serde(default)]
    pub description: String,
    /// Identifier of the OSM polygon containing this POI.
    #[serde(default)]
    pub parent_osm_object_id: Option<u64>,
    /// Explicit location, authoritative when present.
    #[serde(default)]
    pub coordinate: Option<Point<f64>>,
}

impl CustomPoi {
    /// Construct a POI with a name and no location information.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            website: String::new(),
            location_description: None,
            kind: None,
            description: String::new(),
            parent_osm_object_id: None,
            coordinate: None,
        }
    }

    /// Set an explicit coordinate.
    #[must_use]
    pub const fn with_coordinate(mut self, coordinate: Point<f64>) -> Self {
        self.coordinate = Some(coordinate);
        self
    }

    /// Attach the POI to a parent OSM polygon.
    #[must_use]
    pub const fn with_parent(mut self, parent_osm_object_id: u64) -> Self {
        self.parent_osm_object_id = Some(parent_osm_object_id);
        self
    }
}

/// An alternate search term for a custom POI or an OSM object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    /// Text matched against search queries.
    pub alias_text: String,
    /// Referenced custom POI.
    #[serde(default)]
    pub custom_poi_id: Option<u64>,
    /// Referenced OSM point or polygon.
    #[serde(default)]
    pub osm_object_id: Option<u64>,
}

/// What an [`Alias`] points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasTarget {
    /// Neither reference is set; the alias is inert.
    None,
    /// A custom POI.
    CustomPoi(u64),
    /// An OSM point or polygon.
    OsmObject(u64),
    /// Both references are set, which the data model does not allow.
    Both {
        /// Referenced custom POI.
        custom_poi_id: u64,
        /// Referenced OSM object.
        osm_object_id: u64,
    },
}

impl Alias {
    /// Alias pointing at a custom POI.
    pub fn for_custom_poi(alias_text: impl Into<String>, custom_poi_id: u64) -> Self {
        Self {
            alias_text: alias_text.into(),
            custom_poi_id: Some(custom_poi_id),
            osm_object_id: None,
        }
    }

    /// Alias pointing at an OSM object.
    pub fn for_osm_object(alias_text: impl Into<String>, osm_object_id: u64) -> Self {
        Self {
            alias_text: alias_text.into(),
            custom_poi_id: None,
            osm_object_id: Some(osm_object_id),
        }
    }

    /// Classify the alias references.
    #[must_use]
    pub const fn target(&self) -> AliasTarget {
        match (self.custom_poi_id, self.osm_object_id) {
            (None, None) => AliasTarget::None,
            (Some(id), None) => AliasTarget::CustomPoi(id),
            (None, Some(id)) => AliasTarget::OsmObject(id),
            (Some(custom_poi_id), Some(osm_object_id)) => AliasTarget::Both {
                custom_poi_id,
                osm_object_id,
            },
        }
    }
}

/// Every record a campus store holds, in a form suitable for import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampusSnapshot {
    /// Curated POIs.
    #[serde(default)]
    pub custom_pois: Vec<CustomPoi>,
    /// Imported OSM points.
    #[serde(default)]
    pub osm_points: Vec<OsmPoint>,
    /// Imported OSM polygons.
    #[serde(default)]
    pub osm_polygons: Vec<OsmPolygon>,
    /// Search aliases.
    #[serde(default)]
    pub aliases: Vec<Alias>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None, AliasTarget::None)]
    #[case(Some(3), None, AliasTarget::CustomPoi(3))]
    #[case(None, Some(900), AliasTarget::OsmObject(900))]
    #[case(Some(3), Some(900), AliasTarget::Both { custom_poi_id: 3, osm_object_id: 900 })]
    fn alias_target_reflects_references(
        #[case] custom_poi_id: Option<u64>,
        #[case] osm_object_id: Option<u64>,
        #[case] expected: AliasTarget,
    ) {
        let alias = Alias {
            alias_text: "Gym".into(),
            custom_poi_id,
            osm_object_id,
        };
        assert_eq!(alias.target(), expected);
    }

    #[rstest]
    fn custom_poi_deserialises_with_optional_fields_missing() {
        let json = r#"{"id": 2, "name": "Annex", "parent_osm_object_id": 500}"#;
        let poi: CustomPoi = serde_json::from_str(json).expect("parse POI");
        assert_eq!(poi, CustomPoi::new(2, "Annex").with_parent(500));
    }

    #[rstest]
    fn custom_poi_kind_uses_type_key() {
        let json = r#"{"id": 4, "name": "Commons", "type": "dining"}"#;
        let poi: CustomPoi = serde_json::from_str(json).expect("parse POI");
        assert_eq!(poi.kind.as_deref(), Some("dining"));
    }
}
