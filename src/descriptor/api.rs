//! Public API for the descriptor system
//!
//! External modules should import from here rather than directly from
//! internal modules.

pub use crate::descriptor::delegating::DelegatingDescriptor;
pub use crate::descriptor::error::{DescriptorError, DescriptorResult};
pub use crate::descriptor::extensions::{ExtensionSet, FactoryDescriptor};
pub use crate::descriptor::filter::{visible_descriptors, HideGeneric, VisibilityFilter, SHOW_GENERIC};
pub use crate::descriptor::generic::GenericDescriptor;
pub use crate::descriptor::listener::{
    spawn_reconcile_listener, subscribe_reconciler, RECONCILER_SUBSCRIBER_ID,
};
pub use crate::descriptor::reconcile::{desired_descriptors, FactorySet, ProviderSet, Reconciler};
pub use crate::descriptor::registry::{DescriptorRegistry, ReconcileOutcome, SharedDescriptorRegistry};
pub use crate::descriptor::traits::{Extension, ItemDescriptor, ProviderDescriptor};
pub use crate::descriptor::types::{
    Context, DescriptorKind, IconSpec, Navigator, OrganizationFolder, NESTED_PROJECTS_CATEGORY,
    ORGANIZATION_FOLDER_ID,
};
