use std::collections::{HashMap, VecDeque};

use anyhow::anyhow;
use serde::Serialize;

use crate::error::{LibError, Result};
use crate::models::{check_custom_fields, check_tags, Group, GroupId};
use crate::store::GroupStore;

/// Save-time validation gate, run on every persisted mutation of a group
/// record: project consistency against each currently-linked parent and
/// child, tag shape, custom-field shape. Linked ids with no record are
/// skipped (legacy orphans are repaired elsewhere, not rejected here).
pub fn validate_group(store: &dyn GroupStore, group: &Group) -> Result<()> {
    check_tags(&group.tags)?;
    check_custom_fields(&group.custom_fields)?;

    for parent in store.find_by_ids(&group.parent_ids)? {
        if parent.project_id != group.project_id {
            return Err(LibError::cross_project(
                "Group can not be in a project different from its parent's project",
                anyhow!(
                    "group {} is in project {} but parent {} is in project {}",
                    group.name,
                    group.project_id,
                    parent.name,
                    parent.project_id
                ),
            ));
        }
    }
    for child in store.find_by_ids(&group.child_ids)? {
        if child.project_id != group.project_id {
            return Err(LibError::cross_project(
                "Group can not be in a project different from its children",
                anyhow!(
                    "group {} is in project {} but child {} is in project {}",
                    group.name,
                    group.project_id,
                    child.name,
                    child.project_id
                ),
            ));
        }
    }

    Ok(())
}

/// A structural defect found by auditing the stored hierarchy as a whole.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HierarchyViolation {
    DanglingParent {
        group_id: GroupId,
        parent_id: GroupId,
    },
    DanglingChild {
        group_id: GroupId,
        child_id: GroupId,
    },
    AsymmetricEdge {
        parent_id: GroupId,
        child_id: GroupId,
    },
    CrossProjectEdge {
        parent_id: GroupId,
        child_id: GroupId,
    },
    CycleDetected,
}

impl HierarchyViolation {
    pub const fn code(&self) -> &'static str {
        match self {
            HierarchyViolation::DanglingParent { .. } => "hierarchy_dangling_parent",
            HierarchyViolation::DanglingChild { .. } => "hierarchy_dangling_child",
            HierarchyViolation::AsymmetricEdge { .. } => "hierarchy_asymmetric_edge",
            HierarchyViolation::CrossProjectEdge { .. } => "hierarchy_cross_project_edge",
            HierarchyViolation::CycleDetected => "hierarchy_cycle",
        }
    }

    pub const fn message(&self) -> &'static str {
        match self {
            HierarchyViolation::DanglingParent { .. } => {
                "Group references a parent that does not exist"
            }
            HierarchyViolation::DanglingChild { .. } => {
                "Group references a child that does not exist"
            }
            HierarchyViolation::AsymmetricEdge { .. } => {
                "Edge is recorded on one side only"
            }
            HierarchyViolation::CrossProjectEdge { .. } => {
                "Edge connects groups from different projects"
            }
            HierarchyViolation::CycleDetected => "Hierarchy must be acyclic",
        }
    }
}

/// Audits a full snapshot of the stored groups: dangling references,
/// one-sided edges, cross-project edges, cycles. Dangling and asymmetric
/// edges are excluded from the cycle check so a repairable orphan does not
/// mask (or fake) a cycle report.
pub fn hierarchy_violations(groups: &[Group]) -> Vec<HierarchyViolation> {
    let by_id: HashMap<GroupId, &Group> = groups.iter().map(|group| (group.id, group)).collect();

    let mut violations = Vec::new();
    let mut indegree: HashMap<GroupId, usize> = groups.iter().map(|g| (g.id, 0)).collect();
    let mut children: HashMap<GroupId, Vec<GroupId>> =
        groups.iter().map(|g| (g.id, Vec::new())).collect();

    for group in groups {
        for parent_id in &group.parent_ids {
            match by_id.get(parent_id) {
                None => violations.push(HierarchyViolation::DanglingParent {
                    group_id: group.id,
                    parent_id: *parent_id,
                }),
                Some(parent) => {
                    if !parent.child_ids.contains(&group.id) {
                        violations.push(HierarchyViolation::AsymmetricEdge {
                            parent_id: *parent_id,
                            child_id: group.id,
                        });
                        continue;
                    }
                    if parent.project_id != group.project_id {
                        violations.push(HierarchyViolation::CrossProjectEdge {
                            parent_id: *parent_id,
                            child_id: group.id,
                        });
                    }
                    *indegree.get_mut(&group.id).expect("group id is seeded") += 1;
                    children
                        .get_mut(parent_id)
                        .expect("parent id is seeded")
                        .push(group.id);
                }
            }
        }
        for child_id in &group.child_ids {
            match by_id.get(child_id) {
                None => violations.push(HierarchyViolation::DanglingChild {
                    group_id: group.id,
                    child_id: *child_id,
                }),
                Some(child) => {
                    if !child.parent_ids.contains(&group.id) {
                        violations.push(HierarchyViolation::AsymmetricEdge {
                            parent_id: group.id,
                            child_id: *child_id,
                        });
                    }
                }
            }
        }
    }

    if has_cycle(groups, &children, &indegree) {
        violations.push(HierarchyViolation::CycleDetected);
    }

    violations
}

fn has_cycle(
    groups: &[Group],
    children: &HashMap<GroupId, Vec<GroupId>>,
    indegree: &HashMap<GroupId, usize>,
) -> bool {
    let mut indegree = indegree.clone();
    let mut queue = VecDeque::new();
    for (group_id, degree) in &indegree {
        if *degree == 0 {
            queue.push_back(*group_id);
        }
    }

    let mut visited_count = 0usize;
    while let Some(group_id) = queue.pop_front() {
        visited_count += 1;
        if let Some(child_ids) = children.get(&group_id) {
            for child in child_ids {
                if let Some(child_degree) = indegree.get_mut(child) {
                    *child_degree -= 1;
                    if *child_degree == 0 {
                        queue.push_back(*child);
                    }
                }
            }
        }
    }

    visited_count != groups.len()
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::memory::MemoryInventory;
    use crate::models::ProjectId;

    fn group(project: ProjectId, name: &str) -> Group {
        Group::new(project, name)
    }

    fn pair(parent: &mut Group, child: &mut Group) {
        parent.child_ids.push(child.id);
        child.parent_ids.push(parent.id);
    }

    #[test]
    fn clean_hierarchy_has_no_violations() {
        let project = ProjectId(Uuid::from_u128(1));
        let mut a = group(project, "a");
        let mut b = group(project, "b");
        let mut c = group(project, "c");
        pair(&mut a, &mut b);
        pair(&mut b, &mut c);
        assert!(hierarchy_violations(&[a, b, c]).is_empty());
    }

    #[test]
    fn cycle_is_reported() {
        let project = ProjectId(Uuid::from_u128(1));
        let mut a = group(project, "a");
        let mut b = group(project, "b");
        pair(&mut a, &mut b);
        pair(&mut b, &mut a);
        let violations = hierarchy_violations(&[a, b]);
        assert!(violations.contains(&HierarchyViolation::CycleDetected));
    }

    #[test]
    fn dangling_and_asymmetric_edges_are_reported() {
        let project = ProjectId(Uuid::from_u128(1));
        let mut a = group(project, "a");
        let b = group(project, "b");
        let ghost = GroupId(Uuid::new_v4());

        a.parent_ids.push(ghost);
        // One-sided edge: a claims b as child, b does not know a.
        a.child_ids.push(b.id);

        let violations = hierarchy_violations(&[a.clone(), b.clone()]);
        assert!(violations.contains(&HierarchyViolation::DanglingParent {
            group_id: a.id,
            parent_id: ghost,
        }));
        assert!(violations.contains(&HierarchyViolation::AsymmetricEdge {
            parent_id: a.id,
            child_id: b.id,
        }));
        assert!(!violations.contains(&HierarchyViolation::CycleDetected));
    }

    #[test]
    fn cross_project_edge_is_reported() {
        let mut a = group(ProjectId(Uuid::from_u128(1)), "a");
        let mut b = group(ProjectId(Uuid::from_u128(2)), "b");
        pair(&mut a, &mut b);
        let violations = hierarchy_violations(&[a.clone(), b.clone()]);
        assert!(violations.contains(&HierarchyViolation::CrossProjectEdge {
            parent_id: a.id,
            child_id: b.id,
        }));
    }

    #[test]
    fn validate_rejects_cross_project_links() {
        let inventory = MemoryInventory::new();
        let mut parent = group(ProjectId(Uuid::from_u128(1)), "parent");
        let mut child = group(ProjectId(Uuid::from_u128(2)), "child");
        pair(&mut parent, &mut child);
        inventory.save(&parent).expect("seed parent");
        inventory.save(&child).expect("seed child");

        let err = validate_group(&inventory, &child).expect_err("cross project");
        assert_eq!(err.code, "cross_project_link");
    }

    #[test]
    fn validate_skips_missing_linked_records() {
        let inventory = MemoryInventory::new();
        let mut solo = group(ProjectId(Uuid::from_u128(1)), "solo");
        solo.parent_ids.push(GroupId(Uuid::new_v4()));
        inventory.save(&solo).expect("seed");
        validate_group(&inventory, &solo).expect("orphan id is tolerated");
    }
}
