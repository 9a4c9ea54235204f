//! Descriptor traits
//!
//! [`ProviderDescriptor`] is implemented by navigator providers installed
//! into the host; [`ItemDescriptor`] by everything the "New Item" registry
//! lists.

use crate::descriptor::error::DescriptorResult;
use crate::descriptor::types::{DescriptorKind, IconSpec, Navigator, OrganizationFolder};

/// Anything installable into an extension set
pub trait Extension: Send + Sync {
    /// Stable identifier, unique within its extension kind
    fn id(&self) -> &str;
}

/// A pluggable navigator type
pub trait ProviderDescriptor: Extension {
    fn display_name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    fn category_id(&self) -> &str {
        crate::descriptor::types::NESTED_PROJECTS_CATEGORY
    }

    fn icon(&self) -> IconSpec {
        IconSpec::default()
    }

    /// Synthesize a navigator, optionally guided by a target name
    ///
    /// `Ok(None)` means the provider cannot build a usable navigator from the
    /// name alone. Probing with `None` asks whether the provider can build
    /// one with no hint at all.
    fn new_instance(&self, name: Option<&str>) -> DescriptorResult<Option<Navigator>>;

    /// Marks the single-navigator provider kind, which never counts toward
    /// the number of concrete providers
    fn is_single_provider(&self) -> bool {
        false
    }
}

/// An entry in the "New Item" registry
pub trait ItemDescriptor: Send + Sync + std::fmt::Debug {
    fn id(&self) -> String;

    fn display_name(&self) -> String;

    fn description(&self) -> String;

    fn category_id(&self) -> String;

    fn icon(&self) -> IconSpec;

    fn kind(&self) -> DescriptorKind;

    /// Create a new item called `name`
    fn new_instance(&self, name: &str) -> DescriptorResult<OrganizationFolder>;
}
