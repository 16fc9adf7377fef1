use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LibError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct GroupId(pub Uuid);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GroupId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::from_str(s).map(Self)
    }
}

impl From<Uuid> for GroupId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct ProjectId(pub Uuid);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProjectId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::from_str(s).map(Self)
    }
}

impl From<Uuid> for ProjectId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct HostId(pub Uuid);

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for HostId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::from_str(s).map(Self)
    }
}

impl From<Uuid> for HostId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// One inheritable key/value pair. Keys are unique within a group; both key
/// and value must be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomField {
    pub key: String,
    pub value: String,
}

impl CustomField {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A named group of hosts, owned by exactly one project and linked into a
/// directed acyclic hierarchy through `parent_ids`/`child_ids`.
///
/// Edge lists are duplicate-free and insertion-ordered; the order takes part
/// in the deterministic inheritance merge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub project_id: ProjectId,
    pub parent_ids: Vec<GroupId>,
    pub child_ids: Vec<GroupId>,
    pub tags: Vec<String>,
    pub custom_fields: Vec<CustomField>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Group {
    pub fn new(project_id: ProjectId, name: impl Into<String>) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: GroupId(Uuid::new_v4()),
            name: name.into(),
            description: None,
            project_id,
            parent_ids: Vec::new(),
            child_ids: Vec::new(),
            tags: Vec::new(),
            custom_fields: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_parent(&self, id: GroupId) -> bool {
        self.parent_ids.contains(&id)
    }

    pub fn has_child(&self, id: GroupId) -> bool {
        self.child_ids.contains(&id)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now().naive_utc();
    }

    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|existing| existing != tag);
    }

    /// Sets the value for `key` in place, appending when the key is new.
    pub fn set_custom_field(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.custom_fields.iter_mut().find(|cf| cf.key == key) {
            Some(existing) => existing.value = value,
            None => self.custom_fields.push(CustomField::new(key, value)),
        }
    }

    pub fn remove_custom_field(&mut self, key: &str) {
        self.custom_fields.retain(|cf| cf.key != key);
    }
}

/// A group reference as accepted at the engine boundary: an already-resolved
/// record, a raw id, or the unique display name. Resolved exactly once into a
/// live record before any graph logic runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupRef {
    Handle(Group),
    Id(GroupId),
    Name(String),
}

impl GroupRef {
    /// The raw id carried by the reference, when it carries one. Used by the
    /// legacy-orphan removal path where the record itself no longer exists.
    pub fn id_hint(&self) -> Option<GroupId> {
        match self {
            GroupRef::Handle(group) => Some(group.id),
            GroupRef::Id(id) => Some(*id),
            GroupRef::Name(_) => None,
        }
    }
}

impl From<Group> for GroupRef {
    fn from(value: Group) -> Self {
        GroupRef::Handle(value)
    }
}

impl From<GroupId> for GroupRef {
    fn from(value: GroupId) -> Self {
        GroupRef::Id(value)
    }
}

impl From<&str> for GroupRef {
    fn from(value: &str) -> Self {
        GroupRef::Name(value.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectRef {
    Id(ProjectId),
    Name(String),
}

impl From<ProjectId> for ProjectRef {
    fn from(value: ProjectId) -> Self {
        ProjectRef::Id(value)
    }
}

impl From<&str> for ProjectRef {
    fn from(value: &str) -> Self {
        ProjectRef::Name(value.to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupPayload {
    pub project: ProjectRef,
    pub name: String,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub custom_fields: Option<Vec<CustomField>>,
}

/// Validated attribute set produced by [`CreateGroupPayload::normalize`].
#[derive(Debug, Clone)]
pub struct GroupSeed {
    pub name: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub custom_fields: Vec<CustomField>,
}

impl CreateGroupPayload {
    pub fn normalize(self) -> Result<GroupSeed> {
        let name = normalize_name(&self.name)?;
        let tags = self.tags.unwrap_or_default();
        check_tags(&tags)?;
        let custom_fields = self.custom_fields.unwrap_or_default();
        check_custom_fields(&custom_fields)?;

        Ok(GroupSeed {
            name,
            description: self.description,
            tags,
            custom_fields,
        })
    }
}

/// Partial attribute update. Structural fields (edges, timestamps) have no
/// representation here and cannot be updated through this path.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroupPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub project: Option<ProjectRef>,
    pub tags: Option<Vec<String>>,
    pub custom_fields: Option<Vec<CustomField>>,
}

pub(crate) fn normalize_name(name: &str) -> Result<String> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(LibError::invalid_with_code(
            "missing_required_field",
            "Group name is required",
            anyhow!("empty group name"),
        ));
    }
    Ok(name)
}

pub fn check_tags(tags: &[String]) -> Result<()> {
    let mut seen = std::collections::HashSet::with_capacity(tags.len());
    for tag in tags {
        if !seen.insert(tag.as_str()) {
            return Err(LibError::invalid_with_code(
                "invalid_tags",
                "Tags must be unique",
                anyhow!("tag {tag:?} is listed more than once"),
            ));
        }
    }
    Ok(())
}

pub fn check_custom_fields(custom_fields: &[CustomField]) -> Result<()> {
    let mut seen = std::collections::HashSet::with_capacity(custom_fields.len());
    for cf in custom_fields {
        if cf.key.trim().is_empty() {
            return Err(LibError::invalid_with_code(
                "invalid_custom_fields",
                "Custom field key can't be empty",
                anyhow!("custom field with empty key"),
            ));
        }
        if cf.value.trim().is_empty() {
            return Err(LibError::invalid_with_code(
                "invalid_custom_fields",
                "Custom field value can't be empty",
                anyhow!("custom field {:?} has an empty value", cf.key),
            ));
        }
        if !seen.insert(cf.key.as_str()) {
            return Err(LibError::invalid_with_code(
                "invalid_custom_fields",
                "Custom field keys must be unique",
                anyhow!("key {:?} is provided more than once", cf.key),
            ));
        }
    }
    Ok(())
}
