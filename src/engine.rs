use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::sync::Arc;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::cache::TraversalCache;
use crate::error::{ErrorKind, LibError, Result};
use crate::inheritance;
use crate::invariants::{self, HierarchyViolation};
use crate::models::{
    normalize_name, CreateGroupPayload, CustomField, Group, GroupId, GroupRef, HostId, ProjectId,
    ProjectRef, UpdateGroupPayload,
};
use crate::store::{GroupStore, HostIndex, ProjectGate};

/// High-level group hierarchy actions, the coarse operation surface an API
/// or controller layer drives.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum GroupOperation {
    Create {
        payload: CreateGroupPayload,
    },
    Update {
        group: GroupRef,
        payload: UpdateGroupPayload,
    },
    AddParent {
        group: GroupRef,
        parent: GroupRef,
    },
    AddChild {
        group: GroupRef,
        child: GroupRef,
    },
    RemoveParent {
        group: GroupRef,
        parent: GroupRef,
    },
    RemoveChild {
        group: GroupRef,
        child: GroupRef,
    },
    SetChildren {
        group: GroupRef,
        child_ids: Vec<GroupId>,
    },
    SetHosts {
        group: GroupRef,
        host_ids: Vec<HostId>,
    },
    Delete {
        group: GroupRef,
    },
    Get {
        group: GroupRef,
    },
    Search {
        name_prefix: Option<String>,
        project: Option<ProjectRef>,
    },
    Ancestors {
        group: GroupRef,
    },
    Descendants {
        group: GroupRef,
    },
    EffectiveTags {
        group: GroupRef,
    },
    EffectiveCustomFields {
        group: GroupRef,
    },
    Audit,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum GroupOperationResult {
    Group {
        group: Group,
    },
    Groups {
        items: Vec<Group>,
    },
    Tags {
        tags: BTreeSet<String>,
    },
    CustomFields {
        custom_fields: Vec<CustomField>,
    },
    Batch {
        group: Group,
        errors: Vec<BatchErrorSummary>,
    },
    Deleted {
        group: Group,
    },
    Violations {
        violations: Vec<HierarchyViolation>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchAction {
    Add,
    Remove,
}

/// One failed item of a batch relink; the rest of the batch still applies.
#[derive(Debug)]
pub struct BatchItemError<I> {
    pub target: I,
    pub action: BatchAction,
    pub error: LibError,
}

#[derive(Debug)]
pub struct BatchOutcome<I> {
    pub group: Group,
    pub errors: Vec<BatchItemError<I>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchErrorSummary {
    pub target: String,
    pub action: BatchAction,
    pub code: &'static str,
    pub message: &'static str,
}

fn summarize<I: fmt::Display>(errors: &[BatchItemError<I>]) -> Vec<BatchErrorSummary> {
    errors
        .iter()
        .map(|item| BatchErrorSummary {
            target: item.target.to_string(),
            action: item.action,
            code: item.error.code,
            message: item.error.public,
        })
        .collect()
}

/// Maintains the parent/child graph among groups: structural invariants
/// (acyclicity, single-project membership), inherited metadata resolution,
/// and safe mutation operations over constructor-injected collaborators.
///
/// Cross-entity mutations are not atomic: each side of an edge is persisted
/// by an independent store write, the opposite side first. A fault between
/// the two writes leaves an asymmetric edge that later shows up in
/// [`HierarchyEngine::audit`] and can be repaired through the orphan-tolerant
/// removal path.
#[derive(Clone)]
pub struct HierarchyEngine {
    store: Arc<dyn GroupStore>,
    projects: Arc<dyn ProjectGate>,
    hosts: Arc<dyn HostIndex>,
}

impl HierarchyEngine {
    pub fn new(
        store: Arc<dyn GroupStore>,
        projects: Arc<dyn ProjectGate>,
        hosts: Arc<dyn HostIndex>,
    ) -> Self {
        Self {
            store,
            projects,
            hosts,
        }
    }

    pub fn execute(&self, operation: GroupOperation) -> Result<GroupOperationResult> {
        match operation {
            GroupOperation::Create { payload } => {
                let group = self.create(payload)?;
                Ok(GroupOperationResult::Group { group })
            }
            GroupOperation::Update { group, payload } => {
                let group = self.update(&group, payload)?;
                Ok(GroupOperationResult::Group { group })
            }
            GroupOperation::AddParent { group, parent } => {
                let group = self.add_parent(&group, &parent)?;
                Ok(GroupOperationResult::Group { group })
            }
            GroupOperation::AddChild { group, child } => {
                let group = self.add_child(&group, &child)?;
                Ok(GroupOperationResult::Group { group })
            }
            GroupOperation::RemoveParent { group, parent } => {
                let group = self.remove_parent(&group, &parent)?;
                Ok(GroupOperationResult::Group { group })
            }
            GroupOperation::RemoveChild { group, child } => {
                let group = self.remove_child(&group, &child)?;
                Ok(GroupOperationResult::Group { group })
            }
            GroupOperation::SetChildren { group, child_ids } => {
                let outcome = self.set_children(&group, &child_ids)?;
                Ok(GroupOperationResult::Batch {
                    errors: summarize(&outcome.errors),
                    group: outcome.group,
                })
            }
            GroupOperation::SetHosts { group, host_ids } => {
                let outcome = self.set_hosts(&group, &host_ids)?;
                Ok(GroupOperationResult::Batch {
                    errors: summarize(&outcome.errors),
                    group: outcome.group,
                })
            }
            GroupOperation::Delete { group } => {
                let group = self.delete(&group)?;
                Ok(GroupOperationResult::Deleted { group })
            }
            GroupOperation::Get { group } => {
                let group = self.get(&group)?;
                Ok(GroupOperationResult::Group { group })
            }
            GroupOperation::Search {
                name_prefix,
                project,
            } => {
                let items = self.search(name_prefix.as_deref(), project.as_ref())?;
                Ok(GroupOperationResult::Groups { items })
            }
            GroupOperation::Ancestors { group } => {
                let items = self.ancestors(&group)?;
                Ok(GroupOperationResult::Groups { items })
            }
            GroupOperation::Descendants { group } => {
                let items = self.descendants(&group)?;
                Ok(GroupOperationResult::Groups { items })
            }
            GroupOperation::EffectiveTags { group } => {
                let tags = self.effective_tags(&group)?;
                Ok(GroupOperationResult::Tags { tags })
            }
            GroupOperation::EffectiveCustomFields { group } => {
                let custom_fields = self.effective_custom_fields(&group)?;
                Ok(GroupOperationResult::CustomFields { custom_fields })
            }
            GroupOperation::Audit => {
                let violations = self.audit()?;
                Ok(GroupOperationResult::Violations { violations })
            }
        }
    }

    pub fn create(&self, payload: CreateGroupPayload) -> Result<Group> {
        let project_ref = payload.project.clone();
        let seed = payload.normalize()?;
        let project_id = self.resolve_project(&project_ref)?;
        self.ensure_modifiable(project_id)?;

        let mut group = Group::new(project_id, seed.name);
        group.description = seed.description;
        group.tags = seed.tags;
        group.custom_fields = seed.custom_fields;
        self.persist(&mut group, true)?;

        tracing::info!(group = %group.id, name = %group.name, "created group");
        Ok(group)
    }

    pub fn update(&self, group: &GroupRef, payload: UpdateGroupPayload) -> Result<Group> {
        let mut group = self.resolve_group(group)?;
        self.ensure_modifiable(group.project_id)?;

        if let Some(name) = payload.name {
            group.name = normalize_name(&name)?;
        }
        if let Some(description) = payload.description {
            group.description = Some(description);
        }
        if let Some(project) = payload.project {
            group.project_id = self.resolve_project(&project)?;
        }
        if let Some(tags) = payload.tags {
            group.tags = tags;
        }
        if let Some(custom_fields) = payload.custom_fields {
            group.custom_fields = custom_fields;
        }

        self.persist(&mut group, false)?;
        Ok(group)
    }

    pub fn add_parent(&self, group: &GroupRef, parent: &GroupRef) -> Result<Group> {
        let mut group = self.resolve_group(group)?;
        let mut parent = self.resolve_group(parent)?;
        self.ensure_modifiable(group.project_id)?;

        if group.has_parent(parent.id) {
            return Err(LibError::already_exists(
                "Group is already a parent of this group",
                anyhow!("{} is already a parent of {}", parent.name, group.name),
            ));
        }
        if parent.id == group.id {
            return Err(LibError::cycle(
                "Can't make a group a parent of itself",
                anyhow!("self-parent on {}", group.name),
            ));
        }
        // Walks the full ancestor closure of the candidate, so cycles of any
        // depth are rejected before either side is touched.
        let mut cache = TraversalCache::new();
        let ancestors = cache.ancestors(self.store.as_ref(), &parent)?;
        if ancestors.iter().any(|ancestor| ancestor.id == group.id) {
            return Err(LibError::cycle(
                "Can't add a descendant group as a parent",
                anyhow!("{} is reachable from {}", group.name, parent.name),
            ));
        }
        if group.project_id != parent.project_id {
            return Err(LibError::cross_project(
                "Can not add a parent from a different project",
                anyhow!(
                    "{} is in project {}, {} is in project {}",
                    group.name,
                    group.project_id,
                    parent.name,
                    parent.project_id
                ),
            ));
        }

        parent.child_ids.push(group.id);
        group.parent_ids.push(parent.id);
        self.persist(&mut parent, false)?;
        self.persist(&mut group, false)?;

        tracing::debug!(group = %group.id, parent = %parent.id, "added parent edge");
        Ok(group)
    }

    pub fn add_child(&self, group: &GroupRef, child: &GroupRef) -> Result<Group> {
        let mut group = self.resolve_group(group)?;
        let mut child = self.resolve_group(child)?;
        self.ensure_modifiable(group.project_id)?;

        if group.has_child(child.id) {
            return Err(LibError::already_exists(
                "Group is already a child of this group",
                anyhow!("{} is already a child of {}", child.name, group.name),
            ));
        }
        if child.id == group.id {
            return Err(LibError::cycle(
                "Can't make a group a child of itself",
                anyhow!("self-child on {}", group.name),
            ));
        }
        let mut cache = TraversalCache::new();
        let descendants = cache.descendants(self.store.as_ref(), &child)?;
        if descendants.iter().any(|descendant| descendant.id == group.id) {
            return Err(LibError::cycle(
                "Can't add an ancestor group as a child",
                anyhow!("{} is reachable from {}", group.name, child.name),
            ));
        }
        if group.project_id != child.project_id {
            return Err(LibError::cross_project(
                "Can not add a child from a different project",
                anyhow!(
                    "{} is in project {}, {} is in project {}",
                    group.name,
                    group.project_id,
                    child.name,
                    child.project_id
                ),
            ));
        }

        child.parent_ids.push(group.id);
        group.child_ids.push(child.id);
        self.persist(&mut child, false)?;
        self.persist(&mut group, false)?;

        tracing::debug!(group = %group.id, child = %child.id, "added child edge");
        Ok(group)
    }

    pub fn remove_parent(&self, group: &GroupRef, parent: &GroupRef) -> Result<Group> {
        let mut group = self.resolve_group(group)?;
        self.ensure_modifiable(group.project_id)?;

        let mut parent = match self.resolve_group(parent) {
            Ok(parent) => parent,
            Err(err) if err.kind == ErrorKind::NotFound => {
                // Orphaned id left in the edge list by historical bugs: strip
                // it locally, no symmetric update to attempt.
                return self.strip_orphaned_edge(group, parent, EdgeSide::Parent, err);
            }
            Err(err) => return Err(err),
        };

        if !group.has_parent(parent.id) {
            return Err(LibError::not_found(
                "Group is not a parent of this group",
                anyhow!("{} is not a parent of {}", parent.name, group.name),
            ));
        }

        parent.child_ids.retain(|id| *id != group.id);
        group.parent_ids.retain(|id| *id != parent.id);
        self.persist(&mut parent, false)?;
        self.persist(&mut group, false)?;

        tracing::debug!(group = %group.id, parent = %parent.id, "removed parent edge");
        Ok(group)
    }

    pub fn remove_child(&self, group: &GroupRef, child: &GroupRef) -> Result<Group> {
        let mut group = self.resolve_group(group)?;
        self.ensure_modifiable(group.project_id)?;

        let mut child = match self.resolve_group(child) {
            Ok(child) => child,
            Err(err) if err.kind == ErrorKind::NotFound => {
                return self.strip_orphaned_edge(group, child, EdgeSide::Child, err);
            }
            Err(err) => return Err(err),
        };

        if !group.has_child(child.id) {
            return Err(LibError::not_found(
                "Group is not a child of this group",
                anyhow!("{} is not a child of {}", child.name, group.name),
            ));
        }

        child.parent_ids.retain(|id| *id != group.id);
        group.child_ids.retain(|id| *id != child.id);
        self.persist(&mut child, false)?;
        self.persist(&mut group, false)?;

        tracing::debug!(group = %group.id, child = %child.id, "removed child edge");
        Ok(group)
    }

    pub fn remove_all_parents(&self, group: &GroupRef) -> Result<Group> {
        let group = self.resolve_group(group)?;
        for parent_id in group.parent_ids.clone() {
            self.remove_parent(&GroupRef::Id(group.id), &GroupRef::Id(parent_id))?;
        }
        self.resolve_group(&GroupRef::Id(group.id))
    }

    pub fn remove_all_children(&self, group: &GroupRef) -> Result<Group> {
        let group = self.resolve_group(group)?;
        for child_id in group.child_ids.clone() {
            self.remove_child(&GroupRef::Id(group.id), &GroupRef::Id(child_id))?;
        }
        self.resolve_group(&GroupRef::Id(group.id))
    }

    /// Clears group membership on every host currently assigned to the group.
    pub fn remove_all_hosts(&self, group: &GroupRef) -> Result<()> {
        let group = self.resolve_group(group)?;
        self.ensure_modifiable(group.project_id)?;
        for host in self.hosts.find_by_group(group.id)? {
            self.hosts.reassign(host, None)?;
        }
        Ok(())
    }

    /// Re-links the group's children to exactly `desired`: every current
    /// child missing from `desired` is detached, every new id attached.
    /// Item failures are collected, never aborting the rest of the batch;
    /// applied changes stay committed.
    pub fn set_children(
        &self,
        group: &GroupRef,
        desired: &[GroupId],
    ) -> Result<BatchOutcome<GroupId>> {
        let group = self.resolve_group(group)?;
        self.ensure_modifiable(group.project_id)?;

        let desired_set: HashSet<GroupId> = desired.iter().copied().collect();
        let current_set: HashSet<GroupId> = group.child_ids.iter().copied().collect();
        let mut errors = Vec::new();

        for child_id in group
            .child_ids
            .iter()
            .filter(|id| !desired_set.contains(*id))
        {
            if let Err(error) = self.remove_child(&GroupRef::Id(group.id), &GroupRef::Id(*child_id))
            {
                errors.push(BatchItemError {
                    target: *child_id,
                    action: BatchAction::Remove,
                    error,
                });
            }
        }

        let mut attempted = HashSet::new();
        for child_id in desired
            .iter()
            .filter(|id| !current_set.contains(*id))
            .filter(|id| attempted.insert(**id))
        {
            if let Err(error) = self.add_child(&GroupRef::Id(group.id), &GroupRef::Id(*child_id)) {
                errors.push(BatchItemError {
                    target: *child_id,
                    action: BatchAction::Add,
                    error,
                });
            }
        }

        let group = self.resolve_group(&GroupRef::Id(group.id))?;
        Ok(BatchOutcome { group, errors })
    }

    /// Re-points host membership so that exactly `desired` hosts live in the
    /// group. Same partial-application contract as [`set_children`].
    ///
    /// [`set_children`]: HierarchyEngine::set_children
    pub fn set_hosts(&self, group: &GroupRef, desired: &[HostId]) -> Result<BatchOutcome<HostId>> {
        let group = self.resolve_group(group)?;
        self.ensure_modifiable(group.project_id)?;

        let current = self.hosts.find_by_group(group.id)?;
        let desired_set: HashSet<HostId> = desired.iter().copied().collect();
        let current_set: HashSet<HostId> = current.iter().copied().collect();
        let mut errors = Vec::new();

        for host in current.iter().filter(|id| !desired_set.contains(*id)) {
            if let Err(error) = self.hosts.reassign(*host, None) {
                errors.push(BatchItemError {
                    target: *host,
                    action: BatchAction::Remove,
                    error,
                });
            }
        }

        let mut attempted = HashSet::new();
        for host in desired
            .iter()
            .filter(|id| !current_set.contains(*id))
            .filter(|id| attempted.insert(**id))
        {
            if let Err(error) = self.hosts.reassign(*host, Some(group.id)) {
                errors.push(BatchItemError {
                    target: *host,
                    action: BatchAction::Add,
                    error,
                });
            }
        }

        let group = self.resolve_group(&GroupRef::Id(group.id))?;
        Ok(BatchOutcome { group, errors })
    }

    /// Deletes an empty group (no children, no hosts). Remaining parent
    /// edges are stripped as part of deletion, not rejected. Returns the
    /// final snapshot of the deleted record.
    pub fn delete(&self, group: &GroupRef) -> Result<Group> {
        let group = self.resolve_group(group)?;
        self.ensure_modifiable(group.project_id)?;

        if !group.child_ids.is_empty() {
            return Err(LibError::not_empty(
                "Can't delete a group with child groups attached",
                anyhow!("{} still has {} children", group.name, group.child_ids.len()),
            ));
        }
        if self.hosts.count_by_group(group.id)? > 0 {
            return Err(LibError::not_empty(
                "Can't delete a group with hosts in it",
                anyhow!("{} still has hosts", group.name),
            ));
        }

        let snapshot = self.remove_all_parents(&GroupRef::Id(group.id))?;
        self.store.delete(snapshot.id)?;

        tracing::info!(group = %snapshot.id, name = %snapshot.name, "deleted group");
        Ok(snapshot)
    }

    /// Detaches the group from both directions of the hierarchy and deletes
    /// it. Unlike [`delete`], attached children don't block; their edges to
    /// this group are stripped. Hosts still block.
    ///
    /// [`delete`]: HierarchyEngine::delete
    pub fn detach_and_delete(&self, group: &GroupRef) -> Result<Group> {
        let group = self.resolve_group(group)?;
        self.ensure_modifiable(group.project_id)?;

        if self.hosts.count_by_group(group.id)? > 0 {
            return Err(LibError::not_empty(
                "Can't delete a group with hosts in it",
                anyhow!("{} still has hosts", group.name),
            ));
        }

        self.remove_all_parents(&GroupRef::Id(group.id))?;
        let snapshot = self.remove_all_children(&GroupRef::Id(group.id))?;
        self.store.delete(snapshot.id)?;

        tracing::info!(group = %snapshot.id, name = %snapshot.name, "detached and deleted group");
        Ok(snapshot)
    }

    pub fn get(&self, group: &GroupRef) -> Result<Group> {
        self.resolve_group(group)
    }

    /// Name-sorted listing, optionally narrowed by a name prefix (applied
    /// only when at least two characters long) and/or an owning project.
    pub fn search(
        &self,
        name_prefix: Option<&str>,
        project: Option<&ProjectRef>,
    ) -> Result<Vec<Group>> {
        let mut groups = match name_prefix {
            Some(prefix) if prefix.len() >= 2 => self.store.find_by_name_prefix(prefix)?,
            _ => self.store.list_all()?,
        };
        if let Some(project) = project {
            let project_id = self.resolve_project(project)?;
            groups.retain(|group| group.project_id == project_id);
        }
        Ok(groups)
    }

    pub fn is_empty(&self, group: &GroupRef) -> Result<bool> {
        let group = self.resolve_group(group)?;
        Ok(group.child_ids.is_empty() && self.hosts.count_by_group(group.id)? == 0)
    }

    pub fn ancestors(&self, group: &GroupRef) -> Result<Vec<Group>> {
        let group = self.resolve_group(group)?;
        TraversalCache::new().ancestors(self.store.as_ref(), &group)
    }

    pub fn descendants(&self, group: &GroupRef) -> Result<Vec<Group>> {
        let group = self.resolve_group(group)?;
        TraversalCache::new().descendants(self.store.as_ref(), &group)
    }

    pub fn effective_tags(&self, group: &GroupRef) -> Result<BTreeSet<String>> {
        let group = self.resolve_group(group)?;
        let mut cache = TraversalCache::new();
        inheritance::effective_tags(self.store.as_ref(), &mut cache, &group)
    }

    pub fn effective_custom_fields(&self, group: &GroupRef) -> Result<Vec<CustomField>> {
        let group = self.resolve_group(group)?;
        let mut cache = TraversalCache::new();
        inheritance::effective_custom_fields(self.store.as_ref(), &mut cache, &group)
    }

    /// Hosts assigned to the group or to any of its descendants.
    pub fn all_host_ids(&self, group: &GroupRef) -> Result<Vec<HostId>> {
        let group = self.resolve_group(group)?;
        let mut cache = TraversalCache::new();
        let mut ids = self.hosts.find_by_group(group.id)?;
        for descendant in cache.descendants(self.store.as_ref(), &group)? {
            ids.extend(self.hosts.find_by_group(descendant.id)?);
        }
        Ok(ids)
    }

    /// Groups carrying the tag themselves, plus all their descendants (which
    /// inherit it), each listed once in first-discovered order.
    pub fn find_by_tag_recursive(&self, tag: &str) -> Result<Vec<Group>> {
        let tagged = self.store.find_by_tag(tag)?;
        let mut cache = TraversalCache::new();
        let mut seen = HashSet::new();
        let mut result = Vec::new();
        for group in tagged {
            let descendants = cache.descendants(self.store.as_ref(), &group)?;
            if seen.insert(group.id) {
                result.push(group);
            }
            for descendant in descendants {
                if seen.insert(descendant.id) {
                    result.push(descendant);
                }
            }
        }
        Ok(result)
    }

    /// Scans the whole stored hierarchy for structural defects.
    pub fn audit(&self) -> Result<Vec<HierarchyViolation>> {
        let groups = self.store.list_all()?;
        let violations = invariants::hierarchy_violations(&groups);
        if !violations.is_empty() {
            tracing::warn!(count = violations.len(), "hierarchy audit found violations");
        }
        Ok(violations)
    }

    fn resolve_group(&self, group: &GroupRef) -> Result<Group> {
        let found = match group {
            GroupRef::Handle(handle) => self.store.find_by_id(handle.id)?,
            GroupRef::Id(id) => self.store.find_by_id(*id)?,
            GroupRef::Name(name) => self.store.find_by_name(name)?,
        };
        found.ok_or_else(|| {
            LibError::not_found(
                "Group not found",
                anyhow!("group reference {group:?} did not resolve"),
            )
        })
    }

    fn resolve_project(&self, project: &ProjectRef) -> Result<ProjectId> {
        self.projects.resolve(project)?.ok_or_else(|| {
            LibError::not_found(
                "Project not found",
                anyhow!("project reference {project:?} did not resolve"),
            )
        })
    }

    fn ensure_modifiable(&self, project: ProjectId) -> Result<()> {
        if self.projects.modification_allowed(project)? {
            Ok(())
        } else {
            Err(LibError::forbidden(
                "Structural modification is not allowed for this project",
                anyhow!("project gate refused project {project}"),
            ))
        }
    }

    /// Validates and writes one record. `updated_at` is touched on every
    /// save of an already-persisted record, never on first save.
    fn persist(&self, group: &mut Group, is_new: bool) -> Result<()> {
        invariants::validate_group(self.store.as_ref(), group)?;
        if !is_new {
            group.touch();
        }
        self.store.save(group)
    }

    fn strip_orphaned_edge(
        &self,
        mut group: Group,
        missing: &GroupRef,
        side: EdgeSide,
        resolve_err: LibError,
    ) -> Result<Group> {
        let Some(raw_id) = missing.id_hint() else {
            return Err(resolve_err);
        };
        let edge_list = match side {
            EdgeSide::Parent => &mut group.parent_ids,
            EdgeSide::Child => &mut group.child_ids,
        };
        if !edge_list.contains(&raw_id) {
            return Err(resolve_err);
        }
        edge_list.retain(|id| *id != raw_id);
        self.persist(&mut group, false)?;

        tracing::debug!(group = %group.id, orphan = %raw_id, "stripped orphaned edge id");
        Ok(group)
    }
}

#[derive(Debug, Clone, Copy)]
enum EdgeSide {
    Parent,
    Child,
}
