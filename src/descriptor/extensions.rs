//! Installed extension sets
//!
//! One [`ExtensionSet`] per extension kind. Every install or uninstall is
//! announced on the notification bus as an `ExtensionEvent`, which is what
//! drives registry reconciliation.

use crate::core::sync::{handle_rwlock_read, handle_rwlock_write};
use crate::descriptor::error::{DescriptorError, DescriptorResult};
use crate::descriptor::traits::Extension;
use crate::notifications::api::{
    Event, ExtensionChange, ExtensionEvent, ExtensionKind, SharedNotificationManager,
};
use std::sync::{Arc, RwLock};

/// The prerequisite project factory kind
///
/// At least one factory must be installed before delegating descriptors are
/// offered at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryDescriptor {
    pub id: String,
    pub display_name: String,
}

impl FactoryDescriptor {
    pub fn new(id: &str, display_name: &str) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
        }
    }
}

impl Extension for FactoryDescriptor {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Installed extensions of one kind, in installation order
pub struct ExtensionSet<T: ?Sized + Extension> {
    kind: ExtensionKind,
    items: RwLock<Vec<Arc<T>>>,
    notifications: Option<SharedNotificationManager>,
}

impl<T: ?Sized + Extension> std::fmt::Debug for ExtensionSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<String> = self
            .items
            .read()
            .map(|items| items.iter().map(|item| item.id().to_string()).collect())
            .unwrap_or_default();
        f.debug_struct("ExtensionSet")
            .field("kind", &self.kind)
            .field("items", &ids)
            .finish()
    }
}

impl<T: ?Sized + Extension> ExtensionSet<T> {
    /// Create an empty set that does not announce changes
    pub fn new(kind: ExtensionKind) -> Self {
        Self {
            kind,
            items: RwLock::new(Vec::new()),
            notifications: None,
        }
    }

    /// Create an empty set that publishes its changes on `notifications`
    pub fn with_notifications(kind: ExtensionKind, notifications: SharedNotificationManager) -> Self {
        Self {
            kind,
            items: RwLock::new(Vec::new()),
            notifications: Some(notifications),
        }
    }

    pub fn kind(&self) -> ExtensionKind {
        self.kind
    }

    /// Install an extension and announce it
    pub async fn install(&self, extension: Arc<T>) -> DescriptorResult<()> {
        let id = extension.id().to_string();
        {
            let mut items =
                handle_rwlock_write(self.items.write(), DescriptorError::synchronisation)?;
            if items.iter().any(|item| item.id() == id) {
                return Err(DescriptorError::DuplicateExtension {
                    kind: self.kind,
                    id,
                });
            }
            items.push(extension);
        }
        log::debug!("Installed {} extension '{}'", self.kind, id);

        self.announce(ExtensionChange::Installed, id).await;
        Ok(())
    }

    /// Uninstall the extension with `id` and announce it
    pub async fn uninstall(&self, id: &str) -> DescriptorResult<Arc<T>> {
        let removed = {
            let mut items =
                handle_rwlock_write(self.items.write(), DescriptorError::synchronisation)?;
            let position = items.iter().position(|item| item.id() == id).ok_or_else(|| {
                DescriptorError::ExtensionNotFound {
                    kind: self.kind,
                    id: id.to_string(),
                }
            })?;
            items.remove(position)
        };
        log::debug!("Uninstalled {} extension '{}'", self.kind, id);

        self.announce(ExtensionChange::Uninstalled, id.to_string())
            .await;
        Ok(removed)
    }

    /// Current members in installation order
    pub fn snapshot(&self) -> DescriptorResult<Vec<Arc<T>>> {
        let items = handle_rwlock_read(self.items.read(), DescriptorError::synchronisation)?;
        Ok(items.clone())
    }

    pub fn contains(&self, id: &str) -> DescriptorResult<bool> {
        let items = handle_rwlock_read(self.items.read(), DescriptorError::synchronisation)?;
        Ok(items.iter().any(|item| item.id() == id))
    }

    pub fn len(&self) -> DescriptorResult<usize> {
        let items = handle_rwlock_read(self.items.read(), DescriptorError::synchronisation)?;
        Ok(items.len())
    }

    pub fn is_empty(&self) -> DescriptorResult<bool> {
        Ok(self.len()? == 0)
    }

    async fn announce(&self, change: ExtensionChange, id: String) {
        let Some(notifications) = &self.notifications else {
            return;
        };
        let event = Event::Extension(ExtensionEvent::new(self.kind, change, id));
        if let Err(e) = notifications.lock().await.publish(event).await {
            log::warn!("Extension change not delivered to every subscriber: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::api::{new_notification_service, EventFilter};

    #[tokio::test]
    async fn test_install_and_uninstall_keep_order() {
        let factories = ExtensionSet::new(ExtensionKind::Factory);

        factories
            .install(Arc::new(FactoryDescriptor::new("multibranch", "Multibranch")))
            .await
            .unwrap();
        factories
            .install(Arc::new(FactoryDescriptor::new("pipeline", "Pipeline")))
            .await
            .unwrap();

        let ids: Vec<String> = factories
            .snapshot()
            .unwrap()
            .iter()
            .map(|f| f.id.clone())
            .collect();
        assert_eq!(ids, vec!["multibranch", "pipeline"]);

        let removed = factories.uninstall("multibranch").await.unwrap();
        assert_eq!(removed.display_name, "Multibranch");
        assert_eq!(factories.len().unwrap(), 1);
        assert!(!factories.contains("multibranch").unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_and_unknown_ids_are_rejected() {
        let factories: ExtensionSet<FactoryDescriptor> = ExtensionSet::new(ExtensionKind::Factory);
        factories
            .install(Arc::new(FactoryDescriptor::new("multibranch", "Multibranch")))
            .await
            .unwrap();

        let duplicate = factories
            .install(Arc::new(FactoryDescriptor::new("multibranch", "Again")))
            .await;
        assert_eq!(
            duplicate,
            Err(DescriptorError::DuplicateExtension {
                kind: ExtensionKind::Factory,
                id: "multibranch".to_string(),
            })
        );

        let missing = factories.uninstall("pipeline").await;
        assert!(matches!(
            missing,
            Err(DescriptorError::ExtensionNotFound { .. })
        ));
        assert_eq!(factories.len().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_changes_are_announced() {
        let notifications = new_notification_service();
        let mut receiver = notifications.lock().await.subscribe(
            "test".to_string(),
            EventFilter::ExtensionOnly,
            "test:extensions".to_string(),
        );
        let factories = ExtensionSet::with_notifications(ExtensionKind::Factory, notifications);

        factories
            .install(Arc::new(FactoryDescriptor::new("multibranch", "Multibranch")))
            .await
            .unwrap();
        factories.uninstall("multibranch").await.unwrap();

        match receiver.recv().await {
            Some(Event::Extension(event)) => {
                assert_eq!(event.kind, ExtensionKind::Factory);
                assert_eq!(event.change, ExtensionChange::Installed);
                assert_eq!(event.extension_id, "multibranch");
            }
            other => panic!("expected extension event, got {:?}", other),
        }
        match receiver.recv().await {
            Some(Event::Extension(event)) => {
                assert_eq!(event.change, ExtensionChange::Uninstalled)
            }
            other => panic!("expected extension event, got {:?}", other),
        }
    }
}
