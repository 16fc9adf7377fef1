use std::collections::{BTreeMap, BTreeSet};

use crate::cache::TraversalCache;
use crate::error::Result;
use crate::models::{CustomField, Group};
use crate::store::GroupStore;

/// The union of the group's own tags and every ancestor's tags, deduplicated.
/// The returned set iterates in lexical order; callers must not attach
/// meaning to the order.
pub fn effective_tags(
    store: &dyn GroupStore,
    cache: &mut TraversalCache,
    group: &Group,
) -> Result<BTreeSet<String>> {
    if let Some(hit) = cache.cached_tags(group.id) {
        return Ok(hit);
    }

    let mut tags: BTreeSet<String> = group.tags.iter().cloned().collect();
    for ancestor in cache.ancestors(store, group)? {
        tags.extend(ancestor.tags.iter().cloned());
    }

    cache.remember_tags(group.id, &tags);
    Ok(tags)
}

/// The merged custom-field view of a group and its ancestor closure,
/// returned sorted by key.
///
/// Merge rule: ancestors are applied from farthest to nearest, each
/// contributing its own fields, and the group's own fields are applied last.
/// For a key supplied by several ancestors this means the nearest ancestor
/// wins; between distinct ancestors at equal depth, the one discovered
/// through the earlier-listed parent edge wins; the group's own value always
/// wins. Diamonds merge cleanly since the shared ancestor is visited once.
pub fn effective_custom_fields(
    store: &dyn GroupStore,
    cache: &mut TraversalCache,
    group: &Group,
) -> Result<Vec<CustomField>> {
    if let Some(hit) = cache.cached_custom_fields(group.id) {
        return Ok(hit);
    }

    let ancestors = cache.ancestors(store, group)?;

    let mut merged: BTreeMap<String, String> = BTreeMap::new();
    for ancestor in ancestors.iter().rev() {
        for cf in &ancestor.custom_fields {
            merged.insert(cf.key.clone(), cf.value.clone());
        }
    }
    for cf in &group.custom_fields {
        merged.insert(cf.key.clone(), cf.value.clone());
    }

    let fields: Vec<CustomField> = merged
        .into_iter()
        .map(|(key, value)| CustomField { key, value })
        .collect();

    cache.remember_custom_fields(group.id, &fields);
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::memory::MemoryInventory;
    use crate::models::ProjectId;

    fn seed(inventory: &MemoryInventory, name: &str) -> Group {
        let group = Group::new(ProjectId(Uuid::from_u128(3)), name);
        inventory.save(&group).expect("seed group");
        group
    }

    fn link(inventory: &MemoryInventory, parent: &mut Group, child: &mut Group) {
        parent.child_ids.push(child.id);
        child.parent_ids.push(parent.id);
        inventory.save(parent).expect("save parent");
        inventory.save(child).expect("save child");
    }

    #[test]
    fn tags_union_own_and_inherited() {
        let inventory = MemoryInventory::new();
        let mut parent = seed(&inventory, "parent");
        let mut group = seed(&inventory, "group");
        parent.tags = vec!["t1".to_string(), "t2".to_string()];
        inventory.save(&parent).expect("save tags");
        group.tags = vec!["t1".to_string()];
        inventory.save(&group).expect("save tags");
        link(&inventory, &mut parent, &mut group);

        let mut cache = TraversalCache::new();
        let tags = effective_tags(&inventory, &mut cache, &group).expect("resolve");
        let expected: BTreeSet<String> = ["t1", "t2"].iter().map(|t| t.to_string()).collect();
        assert_eq!(tags, expected);
    }

    #[test]
    fn own_custom_field_overrides_ancestor() {
        let inventory = MemoryInventory::new();
        let mut ancestor = seed(&inventory, "ancestor");
        let mut group = seed(&inventory, "group");
        ancestor.set_custom_field("field3", "original");
        inventory.save(&ancestor).expect("save cf");
        group.set_custom_field("field3", "override");
        inventory.save(&group).expect("save cf");
        link(&inventory, &mut ancestor, &mut group);

        let mut cache = TraversalCache::new();
        let fields = effective_custom_fields(&inventory, &mut cache, &group).expect("resolve");
        assert_eq!(fields, vec![CustomField::new("field3", "override")]);
    }

    #[test]
    fn nearest_ancestor_wins_over_farther_one() {
        let inventory = MemoryInventory::new();
        let mut grand = seed(&inventory, "grand");
        let mut parent = seed(&inventory, "parent");
        let mut group = seed(&inventory, "group");
        grand.set_custom_field("dc", "far");
        parent.set_custom_field("dc", "near");
        inventory.save(&grand).expect("save cf");
        inventory.save(&parent).expect("save cf");
        link(&inventory, &mut grand, &mut parent);
        link(&inventory, &mut parent, &mut group);

        let mut cache = TraversalCache::new();
        let fields = effective_custom_fields(&inventory, &mut cache, &group).expect("resolve");
        assert_eq!(fields, vec![CustomField::new("dc", "near")]);
    }

    #[test]
    fn equal_depth_tie_follows_parent_list_order() {
        let inventory = MemoryInventory::new();
        let mut left = seed(&inventory, "left");
        let mut right = seed(&inventory, "right");
        let mut group = seed(&inventory, "group");
        left.set_custom_field("dc", "from_left");
        right.set_custom_field("dc", "from_right");
        inventory.save(&left).expect("save cf");
        inventory.save(&right).expect("save cf");
        link(&inventory, &mut left, &mut group);
        link(&inventory, &mut right, &mut group);

        let mut cache = TraversalCache::new();
        let fields = effective_custom_fields(&inventory, &mut cache, &group).expect("resolve");
        assert_eq!(
            fields,
            vec![CustomField::new("dc", "from_left")],
            "earlier-listed parent edge wins the tie"
        );
    }

    #[test]
    fn diamond_inheritance_resolves_without_error() {
        let inventory = MemoryInventory::new();
        let mut top = seed(&inventory, "top");
        let mut left = seed(&inventory, "left");
        let mut right = seed(&inventory, "right");
        let mut bottom = seed(&inventory, "bottom");
        top.set_custom_field("shared", "root_value");
        top.tags = vec!["root_tag".to_string()];
        inventory.save(&top).expect("save cf");
        link(&inventory, &mut top, &mut left);
        link(&inventory, &mut top, &mut right);
        link(&inventory, &mut left, &mut bottom);
        link(&inventory, &mut right, &mut bottom);

        let mut cache = TraversalCache::new();
        let fields = effective_custom_fields(&inventory, &mut cache, &bottom).expect("resolve");
        assert_eq!(fields, vec![CustomField::new("shared", "root_value")]);

        let tags = effective_tags(&inventory, &mut cache, &bottom).expect("resolve");
        assert!(tags.contains("root_tag"));
    }

    #[test]
    fn disabled_cache_matches_cached_results() {
        let inventory = MemoryInventory::new();
        let mut parent = seed(&inventory, "parent");
        let mut group = seed(&inventory, "group");
        parent.set_custom_field("dc", "east");
        parent.tags = vec!["inherited".to_string()];
        inventory.save(&parent).expect("save cf");
        link(&inventory, &mut parent, &mut group);

        let mut cached = TraversalCache::new();
        let mut uncached = TraversalCache::disabled();
        assert_eq!(
            effective_custom_fields(&inventory, &mut cached, &group).expect("cached"),
            effective_custom_fields(&inventory, &mut uncached, &group).expect("uncached"),
        );
        assert_eq!(
            effective_tags(&inventory, &mut cached, &group).expect("cached"),
            effective_tags(&inventory, &mut uncached, &group).expect("uncached"),
        );
    }
}
