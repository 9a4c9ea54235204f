//! Descriptor visibility filtering
//!
//! A "New Item" listing shows a descriptor only when every
//! [`VisibilityFilter`] accepts it. [`HideGeneric`] hides the generic
//! organization folder entry in views when the delegating entries already
//! cover every installed provider.

use crate::descriptor::error::DescriptorResult;
use crate::descriptor::reconcile::{FactorySet, ProviderSet};
use crate::descriptor::registry::SharedDescriptorRegistry;
use crate::descriptor::traits::ItemDescriptor;
use crate::descriptor::types::{Context, DescriptorKind};
use std::sync::Arc;

/// Build-time switch for offering the generic organization folder entry
///
/// Off by default: an organization folder is expected to hold exactly one
/// navigator, which the per-provider entries create directly.
pub const SHOW_GENERIC: bool = cfg!(feature = "show-generic");

/// Decides whether a descriptor is listed in a context
pub trait VisibilityFilter: Send + Sync + std::fmt::Debug {
    fn filter(&self, context: &Context, descriptor: &dyn ItemDescriptor) -> DescriptorResult<bool>;
}

/// Hides the generic entry in views unless more than delegation is needed
#[derive(Debug, Clone)]
pub struct HideGeneric {
    providers: Arc<ProviderSet>,
    factories: Arc<FactorySet>,
    show_generic: bool,
}

impl HideGeneric {
    pub fn new(providers: Arc<ProviderSet>, factories: Arc<FactorySet>) -> Self {
        Self {
            providers,
            factories,
            show_generic: SHOW_GENERIC,
        }
    }

    /// Override the build-time switch
    pub fn with_show_generic(mut self, show_generic: bool) -> Self {
        self.show_generic = show_generic;
        self
    }

    fn generic_needed(&self) -> DescriptorResult<bool> {
        if !self.show_generic {
            return Ok(false);
        }
        if self.factories.is_empty()? {
            return Ok(false);
        }

        let mut have_one = false;
        for provider in self.providers.snapshot()? {
            if provider.is_single_provider() {
                continue;
            }
            if have_one || provider.new_instance(None)?.is_none() {
                // more than one provider, or one that needs configuration
                return Ok(true);
            }
            have_one = true;
        }
        Ok(false)
    }
}

impl VisibilityFilter for HideGeneric {
    fn filter(&self, context: &Context, descriptor: &dyn ItemDescriptor) -> DescriptorResult<bool> {
        log::trace!("filtering {}", descriptor.id());
        if descriptor.kind() == DescriptorKind::Generic && context.is_view_like() {
            return self.generic_needed();
        }
        Ok(true)
    }
}

/// Registry snapshot reduced to the descriptors every filter accepts
pub fn visible_descriptors(
    registry: &SharedDescriptorRegistry,
    context: &Context,
    filters: &[Arc<dyn VisibilityFilter>],
) -> DescriptorResult<Vec<Arc<dyn ItemDescriptor>>> {
    let mut visible = Vec::new();
    'descriptors: for descriptor in registry.snapshot()? {
        for filter in filters {
            if !filter.filter(context, descriptor.as_ref())? {
                continue 'descriptors;
            }
        }
        visible.push(descriptor);
    }
    Ok(visible)
}
