use std::collections::HashMap;

use anyhow::anyhow;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::error::{LibError, Result};
use crate::models::{Group, GroupId, HostId, ProjectId, ProjectRef};
use crate::store::{GroupStore, HostIndex, ProjectGate};

/// In-process backend implementing all three collaborator contracts. Backs
/// the unit tests and benchmarks; production deployments plug their own
/// store/gate/index implementations into the engine instead.
#[derive(Default)]
pub struct MemoryInventory {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    groups: HashMap<GroupId, Group>,
    projects: HashMap<ProjectId, ProjectEntry>,
    hosts: HashMap<HostId, HostEntry>,
}

struct ProjectEntry {
    name: String,
    modification_allowed: bool,
}

struct HostEntry {
    group_id: Option<GroupId>,
}

impl MemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_project(&self, name: &str, modification_allowed: bool) -> ProjectId {
        let id = ProjectId(Uuid::new_v4());
        self.state.write().projects.insert(
            id,
            ProjectEntry {
                name: name.to_string(),
                modification_allowed,
            },
        );
        id
    }

    pub fn set_modification_allowed(&self, project: ProjectId, allowed: bool) {
        if let Some(entry) = self.state.write().projects.get_mut(&project) {
            entry.modification_allowed = allowed;
        }
    }

    pub fn add_host(&self, group_id: Option<GroupId>) -> HostId {
        let id = HostId(Uuid::new_v4());
        self.state.write().hosts.insert(id, HostEntry { group_id });
        id
    }

    pub fn host_group(&self, host: HostId) -> Option<GroupId> {
        self.state
            .read()
            .hosts
            .get(&host)
            .and_then(|entry| entry.group_id)
    }

    fn sorted_by_name(mut groups: Vec<Group>) -> Vec<Group> {
        groups.sort_by(|a, b| a.name.cmp(&b.name));
        groups
    }
}

impl GroupStore for MemoryInventory {
    fn find_by_id(&self, id: GroupId) -> Result<Option<Group>> {
        Ok(self.state.read().groups.get(&id).cloned())
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Group>> {
        Ok(self
            .state
            .read()
            .groups
            .values()
            .find(|group| group.name == name)
            .cloned())
    }

    fn find_by_ids(&self, ids: &[GroupId]) -> Result<Vec<Group>> {
        let state = self.state.read();
        Ok(ids
            .iter()
            .filter_map(|id| state.groups.get(id).cloned())
            .collect())
    }

    fn find_by_name_prefix(&self, prefix: &str) -> Result<Vec<Group>> {
        let state = self.state.read();
        Ok(Self::sorted_by_name(
            state
                .groups
                .values()
                .filter(|group| group.name.starts_with(prefix))
                .cloned()
                .collect(),
        ))
    }

    fn find_by_tag(&self, tag: &str) -> Result<Vec<Group>> {
        let state = self.state.read();
        Ok(Self::sorted_by_name(
            state
                .groups
                .values()
                .filter(|group| group.tags.iter().any(|t| t == tag))
                .cloned()
                .collect(),
        ))
    }

    fn list_all(&self) -> Result<Vec<Group>> {
        Ok(Self::sorted_by_name(
            self.state.read().groups.values().cloned().collect(),
        ))
    }

    fn save(&self, group: &Group) -> Result<()> {
        let mut state = self.state.write();
        let name_taken = state
            .groups
            .values()
            .any(|existing| existing.name == group.name && existing.id != group.id);
        if name_taken {
            return Err(LibError::invalid_with_code(
                "duplicate_group_name",
                "Group name is already in use",
                anyhow!("name {:?} is taken", group.name),
            ));
        }
        state.groups.insert(group.id, group.clone());
        Ok(())
    }

    fn delete(&self, id: GroupId) -> Result<()> {
        if self.state.write().groups.remove(&id).is_none() {
            return Err(LibError::not_found(
                "Group not found",
                anyhow!("group {id} not found"),
            ));
        }
        Ok(())
    }
}

impl ProjectGate for MemoryInventory {
    fn resolve(&self, project: &ProjectRef) -> Result<Option<ProjectId>> {
        let state = self.state.read();
        Ok(match project {
            ProjectRef::Id(id) => state.projects.contains_key(id).then_some(*id),
            ProjectRef::Name(name) => state
                .projects
                .iter()
                .find(|(_, entry)| entry.name == *name)
                .map(|(id, _)| *id),
        })
    }

    fn modification_allowed(&self, project: ProjectId) -> Result<bool> {
        Ok(self
            .state
            .read()
            .projects
            .get(&project)
            .map(|entry| entry.modification_allowed)
            .unwrap_or(false))
    }
}

impl HostIndex for MemoryInventory {
    fn count_by_group(&self, group: GroupId) -> Result<usize> {
        Ok(self
            .state
            .read()
            .hosts
            .values()
            .filter(|entry| entry.group_id == Some(group))
            .count())
    }

    fn find_by_group(&self, group: GroupId) -> Result<Vec<HostId>> {
        let state = self.state.read();
        let mut hosts: Vec<HostId> = state
            .hosts
            .iter()
            .filter(|(_, entry)| entry.group_id == Some(group))
            .map(|(id, _)| *id)
            .collect();
        hosts.sort_by_key(|id| id.0);
        Ok(hosts)
    }

    fn reassign(&self, host: HostId, group: Option<GroupId>) -> Result<()> {
        match self.state.write().hosts.get_mut(&host) {
            Some(entry) => {
                entry.group_id = group;
                Ok(())
            }
            None => Err(LibError::not_found(
                "Host not found",
                anyhow!("host {host} not found"),
            )),
        }
    }
}
