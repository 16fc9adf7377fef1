use std::collections::{BTreeSet, HashMap};

use crate::algorithms;
use crate::error::Result;
use crate::models::{CustomField, Group, GroupId};
use crate::store::GroupStore;

/// Memo for closure walks and inherited-metadata results, scoped to one
/// engine operation. The engine constructs a fresh cache per public call and
/// never shares one across operations, so results can't go stale across
/// mutations. [`TraversalCache::disabled`] recomputes every request, for
/// correctness verification against the cached path.
#[derive(Debug, Default)]
pub struct TraversalCache {
    enabled: bool,
    ancestors: HashMap<GroupId, Vec<Group>>,
    descendants: HashMap<GroupId, Vec<Group>>,
    effective_tags: HashMap<GroupId, BTreeSet<String>>,
    effective_custom_fields: HashMap<GroupId, Vec<CustomField>>,
}

impl TraversalCache {
    pub fn new() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    /// A cache that never stores anything; every request recomputes.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn ancestors(&mut self, store: &dyn GroupStore, group: &Group) -> Result<Vec<Group>> {
        if let Some(hit) = self.enabled.then(|| self.ancestors.get(&group.id)).flatten() {
            return Ok(hit.clone());
        }
        let closure = algorithms::ancestor_closure(store, group)?;
        if self.enabled {
            self.ancestors.insert(group.id, closure.clone());
        }
        Ok(closure)
    }

    pub fn descendants(&mut self, store: &dyn GroupStore, group: &Group) -> Result<Vec<Group>> {
        if let Some(hit) = self
            .enabled
            .then(|| self.descendants.get(&group.id))
            .flatten()
        {
            return Ok(hit.clone());
        }
        let closure = algorithms::descendant_closure(store, group)?;
        if self.enabled {
            self.descendants.insert(group.id, closure.clone());
        }
        Ok(closure)
    }

    pub(crate) fn cached_tags(&self, id: GroupId) -> Option<BTreeSet<String>> {
        self.enabled
            .then(|| self.effective_tags.get(&id).cloned())
            .flatten()
    }

    pub(crate) fn remember_tags(&mut self, id: GroupId, tags: &BTreeSet<String>) {
        if self.enabled {
            self.effective_tags.insert(id, tags.clone());
        }
    }

    pub(crate) fn cached_custom_fields(&self, id: GroupId) -> Option<Vec<CustomField>> {
        self.enabled
            .then(|| self.effective_custom_fields.get(&id).cloned())
            .flatten()
    }

    pub(crate) fn remember_custom_fields(&mut self, id: GroupId, fields: &[CustomField]) {
        if self.enabled {
            self.effective_custom_fields.insert(id, fields.to_vec());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use uuid::Uuid;

    use super::*;
    use crate::memory::MemoryInventory;
    use crate::models::{Group, ProjectId};
    use crate::store::GroupStore;

    /// Store wrapper counting id-set lookups, to observe memoization.
    struct CountingStore {
        inner: MemoryInventory,
        lookups: AtomicUsize,
    }

    impl CountingStore {
        fn new(inner: MemoryInventory) -> Self {
            Self {
                inner,
                lookups: AtomicUsize::new(0),
            }
        }

        fn lookups(&self) -> usize {
            self.lookups.load(Ordering::SeqCst)
        }
    }

    impl GroupStore for CountingStore {
        fn find_by_id(&self, id: GroupId) -> Result<Option<Group>> {
            self.inner.find_by_id(id)
        }

        fn find_by_name(&self, name: &str) -> Result<Option<Group>> {
            self.inner.find_by_name(name)
        }

        fn find_by_ids(&self, ids: &[GroupId]) -> Result<Vec<Group>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.find_by_ids(ids)
        }

        fn find_by_name_prefix(&self, prefix: &str) -> Result<Vec<Group>> {
            self.inner.find_by_name_prefix(prefix)
        }

        fn find_by_tag(&self, tag: &str) -> Result<Vec<Group>> {
            self.inner.find_by_tag(tag)
        }

        fn list_all(&self) -> Result<Vec<Group>> {
            self.inner.list_all()
        }

        fn save(&self, group: &Group) -> Result<()> {
            self.inner.save(group)
        }

        fn delete(&self, id: GroupId) -> Result<()> {
            self.inner.delete(id)
        }
    }

    fn chain_of_three() -> (CountingStore, Group) {
        let inventory = MemoryInventory::new();
        let project = ProjectId(Uuid::from_u128(7));
        let mut top = Group::new(project, "top");
        let mut mid = Group::new(project, "mid");
        let mut leaf = Group::new(project, "leaf");
        top.child_ids.push(mid.id);
        mid.parent_ids.push(top.id);
        mid.child_ids.push(leaf.id);
        leaf.parent_ids.push(mid.id);
        for group in [&top, &mid, &leaf] {
            inventory.save(group).expect("seed group");
        }
        (CountingStore::new(inventory), leaf)
    }

    #[test]
    fn repeated_closure_requests_hit_the_memo() {
        let (store, leaf) = chain_of_three();
        let mut cache = TraversalCache::new();

        let first = cache.ancestors(&store, &leaf).expect("walk");
        let walked = store.lookups();
        assert_eq!(first.len(), 2);
        assert!(walked > 0);

        let second = cache.ancestors(&store, &leaf).expect("memoized");
        assert_eq!(second.len(), 2);
        assert_eq!(store.lookups(), walked, "second request must not walk");
    }

    #[test]
    fn disabled_cache_recomputes() {
        let (store, leaf) = chain_of_three();
        let mut cache = TraversalCache::disabled();

        cache.ancestors(&store, &leaf).expect("walk");
        let walked = store.lookups();
        cache.ancestors(&store, &leaf).expect("walk again");
        assert!(store.lookups() > walked, "disabled cache must recompute");
    }

    #[test]
    fn fresh_cache_starts_empty() {
        let (store, leaf) = chain_of_three();

        let mut first_op = TraversalCache::new();
        first_op.ancestors(&store, &leaf).expect("walk");
        let walked = store.lookups();

        // A new operation scope owns a new cache and walks again.
        let mut second_op = TraversalCache::new();
        second_op.ancestors(&store, &leaf).expect("walk");
        assert!(store.lookups() > walked);
    }
}
