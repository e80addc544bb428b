//! Alias lookups that indirect search terms to records.

use std::collections::HashSet;

use log::warn;

use crate::{Alias, AliasTarget, CampusStore, StoreError};

/// Record ids reached through matching aliases.
///
/// Ids are distinct and keep the order in which aliases first referenced
/// them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTargets {
    /// Custom POIs referenced by matching aliases.
    pub custom_poi_ids: Vec<u64>,
    /// OSM points or polygons referenced by matching aliases.
    pub osm_object_ids: Vec<u64>,
}

impl AliasTargets {
    /// Split aliases into custom POI and OSM object ids.
    ///
    /// Aliases with neither reference are ignored. An alias with both
    /// references set contributes to both sets.
    ///
    /// # Examples
    /// ```
    /// use quadrant_core::{Alias, AliasTargets};
    ///
    /// let targets = AliasTargets::from_aliases(&[
    ///     Alias::for_osm_object("Gym", 900),
    ///     Alias::for_osm_object("Gymnasium", 900),
    ///     Alias::for_custom_poi("Books", 1),
    /// ]);
    /// assert_eq!(targets.osm_object_ids, vec![900]);
    /// assert_eq!(targets.custom_poi_ids, vec![1]);
    /// ```
    #[must_use]
    pub fn from_aliases(aliases: &[Alias]) -> Self {
        let mut targets = Self::default();
        let mut seen_custom = HashSet::new();
        let mut seen_osm = HashSet::new();
        for alias in aliases {
            let (custom, osm) = match alias.target() {
                AliasTarget::None => (None, None),
                AliasTarget::CustomPoi(id) => (Some(id), None),
                AliasTarget::OsmObject(id) => (None, Some(id)),
                AliasTarget::Both {
                    custom_poi_id,
                    osm_object_id,
                } => {
                    warn!(
                        "alias {:?} references both custom POI {custom_poi_id} and OSM object {osm_object_id}",
                        alias.alias_text
                    );
                    (Some(custom_poi_id), Some(osm_object_id))
                }
            };
            if let Some(id) = custom.filter(|id| seen_custom.insert(*id)) {
                targets.custom_poi_ids.push(id);
            }
            if let Some(id) = osm.filter(|id| seen_osm.insert(*id)) {
                targets.osm_object_ids.push(id);
            }
        }
        targets
    }
}

/// Aliases whose text contains `query`, ignoring case.
pub fn find_aliases<S>(store: &S, query: &str) -> Result<Vec<Alias>, StoreError>
where
    S: CampusStore + ?Sized,
{
    store.aliases_matching(query)
}

/// Ids of every record reached through an alias matching `query`.
pub fn lookup_alias_targets<S>(store: &S, query: &str) -> Result<AliasTargets, StoreError>
where
    S: CampusStore + ?Sized,
{
    let aliases = find_aliases(store, query)?;
    Ok(AliasTargets::from_aliases(&aliases))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryStore, UnavailableStore};
    use rstest::rstest;

    #[rstest]
    fn nulls_are_ignored() {
        let inert = Alias {
            alias_text: "Nothing".into(),
            custom_poi_id: None,
            osm_object_id: None,
        };
        let targets = AliasTargets::from_aliases(&[inert]);
        assert!(targets.custom_poi_ids.is_empty());
        assert!(targets.osm_object_ids.is_empty());
    }

    #[rstest]
    fn ids_are_distinct_in_first_seen_order() {
        let targets = AliasTargets::from_aliases(&[
            Alias::for_custom_poi("a", 7),
            Alias::for_custom_poi("b", 3),
            Alias::for_custom_poi("c", 7),
            Alias::for_osm_object("d", 12),
        ]);
        assert_eq!(targets.custom_poi_ids, vec![7, 3]);
        assert_eq!(targets.osm_object_ids, vec![12]);
    }

    #[rstest]
    fn alias_with_both_references_lands_in_both_sets() {
        let anomaly = Alias {
            alias_text: "Union".into(),
            custom_poi_id: Some(3),
            osm_object_id: Some(700),
        };
        let targets = AliasTargets::from_aliases(&[anomaly]);
        assert_eq!(targets.custom_poi_ids, vec![3]);
        assert_eq!(targets.osm_object_ids, vec![700]);
    }

    #[rstest]
    fn lookup_matches_alias_text_case_insensitively() {
        let store = MemoryStore::default()
            .with_alias(Alias::for_osm_object("Gym", 900))
            .with_alias(Alias::for_custom_poi("Bookstore", 1));
        let targets = lookup_alias_targets(&store, "gYM").expect("lookup");
        assert_eq!(targets.osm_object_ids, vec![900]);
        assert!(targets.custom_poi_ids.is_empty());
    }

    #[rstest]
    fn lookup_propagates_store_failure() {
        let err = lookup_alias_targets(&UnavailableStore, "gym").expect_err("store offline");
        assert!(matches!(err, StoreError::Unavailable { .. }));
    }
}
