//! Registry reconciliation
//!
//! Derives the delegating descriptors from the installed providers and
//! applies them to the registry. Reconciling is idempotent: running it twice
//! against an unchanged extension state leaves the same registry membership.

use crate::descriptor::delegating::DelegatingDescriptor;
use crate::descriptor::error::DescriptorResult;
use crate::descriptor::extensions::{ExtensionSet, FactoryDescriptor};
use crate::descriptor::registry::{ReconcileOutcome, SharedDescriptorRegistry};
use crate::descriptor::traits::ProviderDescriptor;
use std::sync::Arc;

/// Installed navigator providers
pub type ProviderSet = ExtensionSet<dyn ProviderDescriptor>;

/// Installed project factories
pub type FactorySet = ExtensionSet<FactoryDescriptor>;

/// The delegating descriptors that should be registered
///
/// Nothing is offered without an installed factory. Otherwise every provider
/// that can build a navigator without a name hint gets one descriptor, in
/// provider order. A provider error stops the scan: the descriptors built for
/// the providers before it are returned together with the error.
pub fn desired_descriptors(
    providers: &[Arc<dyn ProviderDescriptor>],
    factories_installed: bool,
) -> (Vec<DelegatingDescriptor>, DescriptorResult<()>) {
    let mut desired = Vec::with_capacity(providers.len());
    if !factories_installed {
        log::debug!("no factory installed; offering no delegating descriptors");
        return (desired, Ok(()));
    }

    for provider in providers {
        match provider.new_instance(None) {
            Ok(Some(_)) => desired.push(DelegatingDescriptor::new(Arc::clone(provider))),
            Ok(None) => log::trace!(
                "provider '{}' cannot infer a navigator from a name",
                provider.id()
            ),
            Err(e) => return (desired, Err(e)),
        }
    }
    (desired, Ok(()))
}

/// Keeps the registry's delegating descriptors in line with the installed
/// extensions
#[derive(Debug, Clone)]
pub struct Reconciler {
    registry: SharedDescriptorRegistry,
    providers: Arc<ProviderSet>,
    factories: Arc<FactorySet>,
}

impl Reconciler {
    pub fn new(
        registry: SharedDescriptorRegistry,
        providers: Arc<ProviderSet>,
        factories: Arc<FactorySet>,
    ) -> Self {
        Self {
            registry,
            providers,
            factories,
        }
    }

    /// Replace the delegating descriptors with a fresh set
    ///
    /// Providers are asked for instances before the registry is locked; the clear and
    /// re-add then happen under one write lock, so readers never observe a
    /// half-applied pass and concurrent passes resolve as last-writer-wins.
    /// A failing provider ends the pass early: the previous delegating
    /// descriptors are still cleared, the providers asked before the failure
    /// keep their fresh descriptors, and the error is returned.
    pub fn reconcile(&self) -> DescriptorResult<ReconcileOutcome> {
        log::debug!("reconciling delegating descriptors");

        let providers = self.providers.snapshot()?;
        let factories_installed = !self.factories.is_empty()?;

        let (desired, checked) = desired_descriptors(&providers, factories_installed);
        let outcome = self.registry.replace_delegating(desired)?;
        match checked {
            Ok(()) => {
                log::debug!(
                    "done: removed {}, added {:?}",
                    outcome.removed,
                    outcome.added
                );
                Ok(outcome)
            }
            Err(e) => {
                log::warn!(
                    "Reconciliation aborted after removing {} and adding {:?}: {}",
                    outcome.removed,
                    outcome.added,
                    e
                );
                Err(e)
            }
        }
    }
}
