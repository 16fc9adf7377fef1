use std::collections::HashSet;

use crate::error::Result;
use crate::models::{Group, GroupId};
use crate::store::GroupStore;

/// Every ancestor reachable from `origin` via parent edges, in breadth order:
/// direct parents first (in edge-list order), then grandparents, and so on.
/// Each ancestor appears once even when reachable along several paths, and
/// `origin` itself is never included. Ids with no record in the store are
/// skipped, so the walk terminates and tolerates orphaned references.
pub fn ancestor_closure(store: &dyn GroupStore, origin: &Group) -> Result<Vec<Group>> {
    closure_walk(store, origin, |group| &group.parent_ids)
}

/// Every descendant reachable from `origin` via child edges; same ordering
/// and tolerance rules as [`ancestor_closure`].
pub fn descendant_closure(store: &dyn GroupStore, origin: &Group) -> Result<Vec<Group>> {
    closure_walk(store, origin, |group| &group.child_ids)
}

fn closure_walk(
    store: &dyn GroupStore,
    origin: &Group,
    edges: fn(&Group) -> &Vec<GroupId>,
) -> Result<Vec<Group>> {
    let mut visited: HashSet<GroupId> = HashSet::new();
    visited.insert(origin.id);

    let mut frontier: Vec<GroupId> = Vec::new();
    for id in edges(origin) {
        if visited.insert(*id) {
            frontier.push(*id);
        }
    }

    let mut closure = Vec::new();
    while !frontier.is_empty() {
        // Best-effort behavior: ids with no record are silently dropped here.
        let records = store.find_by_ids(&frontier)?;
        let mut next = Vec::new();
        for record in records {
            for id in edges(&record) {
                if visited.insert(*id) {
                    next.push(*id);
                }
            }
            closure.push(record);
        }
        frontier = next;
    }

    Ok(closure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryInventory;
    use crate::models::{Group, ProjectId};
    use uuid::Uuid;

    fn seed(inventory: &MemoryInventory, name: &str) -> Group {
        let group = Group::new(ProjectId(Uuid::from_u128(1)), name);
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
    fn ancestors_come_in_breadth_order() {
        let inventory = MemoryInventory::new();
        let mut root = seed(&inventory, "root");
        let mut mid_a = seed(&inventory, "mid_a");
        let mut mid_b = seed(&inventory, "mid_b");
        let mut leaf = seed(&inventory, "leaf");

        link(&inventory, &mut root, &mut mid_a);
        link(&inventory, &mut root, &mut mid_b);
        link(&inventory, &mut mid_a, &mut leaf);
        link(&inventory, &mut mid_b, &mut leaf);

        let closure = ancestor_closure(&inventory, &leaf).expect("walk");
        let names: Vec<&str> = closure.iter().map(|g| g.name.as_str()).collect();
        // Direct parents in edge-list order, the shared grandparent once.
        assert_eq!(names, vec!["mid_a", "mid_b", "root"]);
    }

    #[test]
    fn diamond_ancestors_are_not_duplicated() {
        let inventory = MemoryInventory::new();
        let mut top = seed(&inventory, "top");
        let mut left = seed(&inventory, "left");
        let mut right = seed(&inventory, "right");
        let mut bottom = seed(&inventory, "bottom");

        link(&inventory, &mut top, &mut left);
        link(&inventory, &mut top, &mut right);
        link(&inventory, &mut left, &mut bottom);
        link(&inventory, &mut right, &mut bottom);

        let closure = ancestor_closure(&inventory, &bottom).expect("walk");
        assert_eq!(closure.len(), 3);
        assert_eq!(
            closure.iter().filter(|g| g.name == "top").count(),
            1,
            "shared ancestor must appear once"
        );
    }

    #[test]
    fn dangling_edge_ids_are_skipped() {
        let inventory = MemoryInventory::new();
        let mut parent = seed(&inventory, "parent");
        let mut child = seed(&inventory, "child");
        link(&inventory, &mut parent, &mut child);

        child.parent_ids.push(GroupId(Uuid::new_v4()));
        inventory.save(&child).expect("save with orphan id");

        let closure = ancestor_closure(&inventory, &child).expect("walk");
        assert_eq!(closure.len(), 1);
        assert_eq!(closure[0].name, "parent");
    }

    #[test]
    fn walk_terminates_on_corrupted_cyclic_data() {
        let inventory = MemoryInventory::new();
        let mut a = seed(&inventory, "a");
        let mut b = seed(&inventory, "b");

        // Simulate an invariant violation written by a buggy historical
        // client: a and b are parents of each other.
        a.parent_ids.push(b.id);
        b.parent_ids.push(a.id);
        a.child_ids.push(b.id);
        b.child_ids.push(a.id);
        inventory.save(&a).expect("save a");
        inventory.save(&b).expect("save b");

        let closure = ancestor_closure(&inventory, &a).expect("walk");
        assert_eq!(closure.len(), 1);
        assert_eq!(closure[0].name, "b");

        let descendants = descendant_closure(&inventory, &a).expect("walk");
        assert_eq!(descendants.len(), 1);
    }
}
