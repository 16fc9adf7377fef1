pub mod algorithms;
pub mod cache;
pub mod engine;
pub mod error;
pub mod inheritance;
pub mod invariants;
pub mod memory;
pub mod models;
pub mod store;

pub mod prelude {
    pub use crate::algorithms::{ancestor_closure, descendant_closure};
    pub use crate::cache::TraversalCache;
    pub use crate::engine::{
        BatchAction, BatchItemError, BatchOutcome, GroupOperation, GroupOperationResult,
        HierarchyEngine,
    };
    pub use crate::error::{ErrorKind, LibError, Result};
    pub use crate::inheritance::{effective_custom_fields, effective_tags};
    pub use crate::invariants::{hierarchy_violations, validate_group, HierarchyViolation};
    pub use crate::memory::MemoryInventory;
    pub use crate::models::{
        CreateGroupPayload, CustomField, Group, GroupId, GroupRef, HostId, ProjectId, ProjectRef,
        UpdateGroupPayload,
    };
    pub use crate::store::{GroupStore, HostIndex, ProjectGate};
}
