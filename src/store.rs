use crate::error::Result;
use crate::models::{Group, GroupId, HostId, ProjectId, ProjectRef};

/// Document store holding group records. Implementations enforce global
/// uniqueness of the `name` key on save (code `duplicate_group_name`).
pub trait GroupStore: Send + Sync {
    fn find_by_id(&self, id: GroupId) -> Result<Option<Group>>;

    fn find_by_name(&self, name: &str) -> Result<Option<Group>>;

    /// Records for the given ids, in the order of the input slice. Ids with
    /// no record are skipped, not reported.
    fn find_by_ids(&self, ids: &[GroupId]) -> Result<Vec<Group>>;

    /// Groups whose name starts with `prefix`, sorted by name.
    fn find_by_name_prefix(&self, prefix: &str) -> Result<Vec<Group>>;

    /// Groups carrying `tag` in their own tag list, sorted by name.
    fn find_by_tag(&self, tag: &str) -> Result<Vec<Group>>;

    /// Every stored group, sorted by name.
    fn list_all(&self) -> Result<Vec<Group>>;

    fn save(&self, group: &Group) -> Result<()>;

    fn delete(&self, id: GroupId) -> Result<()>;
}

/// External authority over projects: reference resolution and the structural
/// modification predicate.
pub trait ProjectGate: Send + Sync {
    fn resolve(&self, project: &ProjectRef) -> Result<Option<ProjectId>>;

    fn modification_allowed(&self, project: ProjectId) -> Result<bool>;
}

/// Host membership index: counts and finds hosts by owning group and moves a
/// host's group pointer.
pub trait HostIndex: Send + Sync {
    fn count_by_group(&self, group: GroupId) -> Result<usize>;

    fn find_by_group(&self, group: GroupId) -> Result<Vec<HostId>>;

    fn reassign(&self, host: HostId, group: Option<GroupId>) -> Result<()>;
}
