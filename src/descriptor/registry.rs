//! Descriptor Registry
//!
//! Owned "New Item" registry. Static contributions are merged when the
//! registry is built; afterwards only dynamic add/remove happens, so there is
//! no lazily-loaded state that a later mutation could race with.

use crate::core::sync::{handle_rwlock_read, handle_rwlock_write};
use crate::descriptor::delegating::DelegatingDescriptor;
use crate::descriptor::error::{DescriptorError, DescriptorResult};
use crate::descriptor::traits::ItemDescriptor;
use crate::descriptor::types::DescriptorKind;
use std::sync::{Arc, RwLock};

/// Result of replacing the delegating descriptors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Number of delegating descriptors cleared
    pub removed: usize,
    /// Ids of the delegating descriptors registered, in provider order
    pub added: Vec<String>,
}

/// Registry of item descriptors in registration order
#[derive(Debug, Default)]
pub struct DescriptorRegistry {
    entries: Vec<Arc<dyn ItemDescriptor>>,
}

impl DescriptorRegistry {
    /// Build a registry from its static contributions
    ///
    /// Later contributions with an id already present are dropped with a
    /// warning.
    pub fn new(static_contributions: Vec<Arc<dyn ItemDescriptor>>) -> Self {
        let mut registry = Self::default();
        for descriptor in static_contributions {
            if let Err(e) = registry.add(descriptor) {
                log::warn!("Ignoring static descriptor contribution: {}", e);
            }
        }
        registry
    }

    /// Register a descriptor; ids are unique
    pub fn add(&mut self, descriptor: Arc<dyn ItemDescriptor>) -> DescriptorResult<()> {
        let id = descriptor.id();
        if self.entries.iter().any(|existing| existing.id() == id) {
            return Err(DescriptorError::DuplicateDescriptor { id });
        }
        self.entries.push(descriptor);
        Ok(())
    }

    /// Remove every descriptor matching `predicate`, returning them
    pub fn remove_where<F>(&mut self, mut predicate: F) -> Vec<Arc<dyn ItemDescriptor>>
    where
        F: FnMut(&dyn ItemDescriptor) -> bool,
    {
        let mut removed = Vec::new();
        self.entries.retain(|descriptor| {
            if predicate(descriptor.as_ref()) {
                removed.push(Arc::clone(descriptor));
                false
            } else {
                true
            }
        });
        removed
    }

    pub fn snapshot(&self) -> Vec<Arc<dyn ItemDescriptor>> {
        self.entries.clone()
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn ItemDescriptor>> {
        self.entries
            .iter()
            .find(|descriptor| descriptor.id() == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids of the currently registered delegating descriptors
    pub fn delegating_ids(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|descriptor| is_delegating(descriptor.as_ref()))
            .map(|descriptor| descriptor.id())
            .collect()
    }

    /// Swap the delegating descriptors for `desired` in one step
    ///
    /// A desired descriptor whose id is already taken by a non-delegating
    /// entry is skipped with a warning.
    pub fn replace_delegating(&mut self, desired: Vec<DelegatingDescriptor>) -> ReconcileOutcome {
        let removed = self.remove_where(is_delegating);
        log::debug!(
            "clearing {:?}",
            removed.iter().map(|d| d.id()).collect::<Vec<_>>()
        );

        let mut added = Vec::with_capacity(desired.len());
        for descriptor in desired {
            let id = ItemDescriptor::id(&descriptor);
            match self.add(Arc::new(descriptor)) {
                Ok(()) => {
                    log::debug!("adding {}", id);
                    added.push(id);
                }
                Err(e) => log::warn!("Skipping delegating descriptor: {}", e),
            }
        }

        ReconcileOutcome {
            removed: removed.len(),
            added,
        }
    }
}

fn is_delegating(descriptor: &dyn ItemDescriptor) -> bool {
    matches!(descriptor.kind(), DescriptorKind::Delegating { .. })
}

/// Thread-safe shared descriptor registry
#[derive(Debug, Clone, Default)]
pub struct SharedDescriptorRegistry {
    inner: Arc<RwLock<DescriptorRegistry>>,
}

impl SharedDescriptorRegistry {
    pub fn new(registry: DescriptorRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    pub fn add(&self, descriptor: Arc<dyn ItemDescriptor>) -> DescriptorResult<()> {
        let mut registry =
            handle_rwlock_write(self.inner.write(), DescriptorError::synchronisation)?;
        registry.add(descriptor)
    }

    pub fn remove_where<F>(&self, predicate: F) -> DescriptorResult<Vec<Arc<dyn ItemDescriptor>>>
    where
        F: FnMut(&dyn ItemDescriptor) -> bool,
    {
        let mut registry =
            handle_rwlock_write(self.inner.write(), DescriptorError::synchronisation)?;
        Ok(registry.remove_where(predicate))
    }

    pub fn snapshot(&self) -> DescriptorResult<Vec<Arc<dyn ItemDescriptor>>> {
        let registry = handle_rwlock_read(self.inner.read(), DescriptorError::synchronisation)?;
        Ok(registry.snapshot())
    }

    pub fn get(&self, id: &str) -> DescriptorResult<Option<Arc<dyn ItemDescriptor>>> {
        let registry = handle_rwlock_read(self.inner.read(), DescriptorError::synchronisation)?;
        Ok(registry.get(id))
    }

    pub fn len(&self) -> DescriptorResult<usize> {
        let registry = handle_rwlock_read(self.inner.read(), DescriptorError::synchronisation)?;
        Ok(registry.len())
    }

    pub fn is_empty(&self) -> DescriptorResult<bool> {
        let registry = handle_rwlock_read(self.inner.read(), DescriptorError::synchronisation)?;
        Ok(registry.is_empty())
    }

    pub fn delegating_ids(&self) -> DescriptorResult<Vec<String>> {
        let registry = handle_rwlock_read(self.inner.read(), DescriptorError::synchronisation)?;
        Ok(registry.delegating_ids())
    }

    pub fn replace_delegating(
        &self,
        desired: Vec<DelegatingDescriptor>,
    ) -> DescriptorResult<ReconcileOutcome> {
        let mut registry =
            handle_rwlock_write(self.inner.write(), DescriptorError::synchronisation)?;
        Ok(registry.replace_delegating(desired))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::generic::GenericDescriptor;
    use crate::descriptor::tests::fixtures::{StaticItem, TestProvider};

    fn delegating(provider_id: &str) -> DelegatingDescriptor {
        DelegatingDescriptor::new(Arc::new(TestProvider::inferring(provider_id)))
    }

    #[test]
    fn test_static_contributions_are_merged_once() {
        let registry = DescriptorRegistry::new(vec![
            Arc::new(GenericDescriptor),
            Arc::new(StaticItem::new("freestyle")),
            Arc::new(StaticItem::new("freestyle")),
        ]);

        let ids: Vec<String> = registry.snapshot().iter().map(|d| d.id()).collect();
        assert_eq!(ids, vec!["organization-folder", "freestyle"]);
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let mut registry = DescriptorRegistry::new(vec![Arc::new(GenericDescriptor)]);

        let result = registry.add(Arc::new(GenericDescriptor));

        assert_eq!(
            result,
            Err(DescriptorError::DuplicateDescriptor {
                id: "organization-folder".to_string()
            })
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_where_returns_removed() {
        let mut registry = DescriptorRegistry::new(vec![
            Arc::new(StaticItem::new("freestyle")),
            Arc::new(GenericDescriptor),
            Arc::new(StaticItem::new("pipeline")),
        ]);

        let removed = registry.remove_where(|d| d.id() != "organization-folder");

        assert_eq!(removed.len(), 2);
        assert_eq!(registry.len(), 1);
        assert!(registry.get("organization-folder").is_some());
        assert!(registry.get("freestyle").is_none());
    }

    #[test]
    fn test_replace_delegating_keeps_static_entries() {
        let mut registry = DescriptorRegistry::new(vec![
            Arc::new(GenericDescriptor),
            Arc::new(StaticItem::new("freestyle")),
        ]);

        let first = registry.replace_delegating(vec![delegating("github"), delegating("gitea")]);
        assert_eq!(first.removed, 0);
        assert_eq!(
            first.added,
            vec!["organization-folder.github", "organization-folder.gitea"]
        );

        let second = registry.replace_delegating(vec![delegating("gitea")]);
        assert_eq!(second.removed, 2);
        assert_eq!(registry.delegating_ids(), vec!["organization-folder.gitea"]);
        assert!(registry.get("organization-folder").is_some());
        assert!(registry.get("freestyle").is_some());
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_replace_delegating_skips_taken_ids() {
        let mut registry = DescriptorRegistry::new(vec![Arc::new(StaticItem::new(
            "organization-folder.github",
        ))]);

        let outcome = registry.replace_delegating(vec![delegating("github")]);

        assert!(outcome.added.is_empty());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_shared_registry_operations() {
        let shared = SharedDescriptorRegistry::new(DescriptorRegistry::new(vec![Arc::new(
            GenericDescriptor,
        )]));

        shared.add(Arc::new(StaticItem::new("freestyle"))).unwrap();
        shared.replace_delegating(vec![delegating("github")]).unwrap();

        assert_eq!(shared.len().unwrap(), 3);
        assert_eq!(
            shared.delegating_ids().unwrap(),
            vec!["organization-folder.github"]
        );
        let removed = shared.remove_where(|d| d.id() == "freestyle").unwrap();
        assert_eq!(removed.len(), 1);
        assert!(shared.get("freestyle").unwrap().is_none());
        assert_eq!(shared.snapshot().unwrap().len(), 2);
    }
}
