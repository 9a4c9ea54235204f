//! The host that owns the registry, extension sets and notification bus

use crate::core::sync::handle_mutex_poison;
use crate::descriptor::api::{
    visible_descriptors, Context, DescriptorError, DescriptorRegistry, DescriptorResult,
    FactoryDescriptor, FactorySet, GenericDescriptor, HideGeneric, ItemDescriptor,
    OrganizationFolder, ProviderDescriptor, ProviderSet, Reconciler, SharedDescriptorRegistry,
    VisibilityFilter,
};
use crate::host::error::{HostError, HostResult};
use crate::host::init::{discover_initializers, plan_initializers, InitMilestone, InitializerInfo};
use crate::notifications::api::{
    new_notification_service, Event, ExtensionKind, SharedNotificationManager, SystemEvent,
    SystemEventType,
};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

/// Orchestration host
///
/// Cheap to clone; every clone shares the same state. Extensions may be
/// installed before or after [`Host::start`]: changes made after the
/// descriptor initializer has run are picked up by its listener.
#[derive(Debug, Clone)]
pub struct Host {
    registry: SharedDescriptorRegistry,
    providers: Arc<ProviderSet>,
    factories: Arc<FactorySet>,
    notifications: SharedNotificationManager,
    filters: Arc<Vec<Arc<dyn VisibilityFilter>>>,
    milestone: Arc<Mutex<Option<InitMilestone>>>,
    tasks: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl Default for Host {
    fn default() -> Self {
        Self::new()
    }
}

impl Host {
    /// A host whose registry statically contains the generic descriptor
    pub fn new() -> Self {
        Self::with_static_descriptors(vec![Arc::new(GenericDescriptor)])
    }

    /// A host whose registry starts from `static_contributions`
    pub fn with_static_descriptors(static_contributions: Vec<Arc<dyn ItemDescriptor>>) -> Self {
        let notifications = new_notification_service();
        let providers = Arc::new(ProviderSet::with_notifications(
            ExtensionKind::Provider,
            notifications.clone(),
        ));
        let factories = Arc::new(FactorySet::with_notifications(
            ExtensionKind::Factory,
            notifications.clone(),
        ));
        let hide_generic: Arc<dyn VisibilityFilter> =
            Arc::new(HideGeneric::new(providers.clone(), factories.clone()));

        Self {
            registry: SharedDescriptorRegistry::new(DescriptorRegistry::new(static_contributions)),
            providers,
            factories,
            notifications,
            filters: Arc::new(vec![hide_generic]),
            milestone: Arc::new(Mutex::new(None)),
            tasks: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Replace the visibility filters, e.g. to override the build-time switch
    pub fn with_filters(mut self, filters: Vec<Arc<dyn VisibilityFilter>>) -> Self {
        self.filters = Arc::new(filters);
        self
    }

    pub fn registry(&self) -> &SharedDescriptorRegistry {
        &self.registry
    }

    pub fn providers(&self) -> &Arc<ProviderSet> {
        &self.providers
    }

    pub fn factories(&self) -> &Arc<FactorySet> {
        &self.factories
    }

    pub fn notifications(&self) -> &SharedNotificationManager {
        &self.notifications
    }

    pub fn reconciler(&self) -> Reconciler {
        Reconciler::new(
            self.registry.clone(),
            self.providers.clone(),
            self.factories.clone(),
        )
    }

    pub async fn install_provider(&self, provider: Arc<dyn ProviderDescriptor>) -> HostResult<()> {
        Ok(self.providers.install(provider).await?)
    }

    pub async fn uninstall_provider(&self, id: &str) -> HostResult<()> {
        self.providers.uninstall(id).await?;
        Ok(())
    }

    pub async fn install_factory(&self, factory: FactoryDescriptor) -> HostResult<()> {
        Ok(self.factories.install(Arc::new(factory)).await?)
    }

    pub async fn uninstall_factory(&self, id: &str) -> HostResult<()> {
        self.factories.uninstall(id).await?;
        Ok(())
    }

    /// The last milestone reached, `None` before start
    pub fn milestone(&self) -> HostResult<Option<InitMilestone>> {
        let milestone = handle_mutex_poison(self.milestone.lock(), DescriptorError::synchronisation)?;
        Ok(*milestone)
    }

    /// Walk every milestone, running the registered initializers
    pub async fn start(&self) -> HostResult<()> {
        let initializers = discover_initializers();
        self.start_with(&initializers).await
    }

    /// Walk every milestone, running the given initializers
    pub async fn start_with(&self, initializers: &[&InitializerInfo]) -> HostResult<()> {
        if let Some(milestone) = self.milestone()? {
            return Err(HostError::AlreadyStarted { milestone });
        }
        let plan = plan_initializers(initializers)?;

        for (milestone, due) in plan {
            self.reach(milestone).await?;
            for initializer in due {
                log::debug!("running initializer '{}'", initializer.name);
                (initializer.run)(self.clone()).await.map_err(|e| {
                    HostError::InitializerFailed {
                        name: initializer.name.to_string(),
                        source: Box::new(e),
                    }
                })?;
            }
        }
        log::info!("Host started");
        Ok(())
    }

    async fn reach(&self, milestone: InitMilestone) -> HostResult<()> {
        {
            let mut current =
                handle_mutex_poison(self.milestone.lock(), DescriptorError::synchronisation)?;
            *current = Some(milestone);
        }
        log::trace!("milestone {}", milestone);

        let event = Event::System(SystemEvent::new(SystemEventType::Milestone(milestone)));
        if let Err(e) = self.notifications.lock().await.publish(event).await {
            log::warn!("Milestone {} not delivered: {}", milestone, e);
        }
        Ok(())
    }

    /// Keep a background task alive until shutdown
    pub fn attach_task(&self, handle: JoinHandle<()>) {
        match self.tasks.lock() {
            Ok(mut tasks) => tasks.push(handle),
            Err(poisoned) => poisoned.into_inner().push(handle),
        }
    }

    /// Stop background tasks and announce shutdown
    pub async fn shutdown(&self) {
        let tasks: Vec<JoinHandle<()>> = match self.tasks.lock() {
            Ok(mut tasks) => tasks.drain(..).collect(),
            Err(poisoned) => poisoned.into_inner().drain(..).collect(),
        };
        for task in &tasks {
            task.abort();
        }

        let summary = format!("{} background task(s) aborted", tasks.len());
        let event = Event::System(SystemEvent::with_message(
            SystemEventType::Shutdown,
            summary.clone(),
        ));
        if let Err(e) = self.notifications.lock().await.publish(event).await {
            log::debug!("Shutdown not delivered to every subscriber: {}", e);
        }
        log::info!("Host stopped ({})", summary);
    }

    /// "New Item" entries visible in `context`
    pub fn new_item_entries(&self, context: &Context) -> DescriptorResult<Vec<Arc<dyn ItemDescriptor>>> {
        visible_descriptors(&self.registry, context, &self.filters)
    }

    /// Create an organization folder through the descriptor with `descriptor_id`
    pub fn create_item(&self, descriptor_id: &str, name: &str) -> DescriptorResult<OrganizationFolder> {
        let descriptor = self
            .registry
            .get(descriptor_id)?
            .ok_or_else(|| DescriptorError::DescriptorNotFound {
                id: descriptor_id.to_string(),
            })?;
        log::info!("Creating '{}' with {}", name, descriptor_id);
        descriptor.new_instance(name)
    }
}
