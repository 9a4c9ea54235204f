//! Delegating descriptor
//!
//! One parametric type stands in for every provider-specific "New Item"
//! entry: it forwards display metadata to the wrapped provider and creates
//! an organization folder pre-populated with that provider's navigator.

use crate::descriptor::error::{DescriptorError, DescriptorResult};
use crate::descriptor::traits::{ItemDescriptor, ProviderDescriptor};
use crate::descriptor::types::{DescriptorKind, IconSpec, OrganizationFolder, ORGANIZATION_FOLDER_ID};
use std::fmt;
use std::sync::Arc;

/// Registry entry forwarding to exactly one navigator provider
#[derive(Clone)]
pub struct DelegatingDescriptor {
    delegate: Arc<dyn ProviderDescriptor>,
}

impl DelegatingDescriptor {
    pub fn new(delegate: Arc<dyn ProviderDescriptor>) -> Self {
        Self { delegate }
    }

    /// Registry id for the entry wrapping `provider_id`
    pub fn id_for(provider_id: &str) -> String {
        format!("{}.{}", ORGANIZATION_FOLDER_ID, provider_id)
    }
}

impl fmt::Debug for DelegatingDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegatingDescriptor")
            .field("delegate", &self.delegate.id())
            .finish()
    }
}

impl fmt::Display for DelegatingDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DelegatingDescriptor[{}]", self.delegate.id())
    }
}

impl ItemDescriptor for DelegatingDescriptor {
    fn id(&self) -> String {
        Self::id_for(self.delegate.id())
    }

    fn display_name(&self) -> String {
        self.delegate.display_name().to_string()
    }

    fn description(&self) -> String {
        self.delegate.description().to_string()
    }

    fn category_id(&self) -> String {
        self.delegate.category_id().to_string()
    }

    fn icon(&self) -> IconSpec {
        self.delegate.icon()
    }

    fn kind(&self) -> DescriptorKind {
        DescriptorKind::Delegating {
            provider_id: self.delegate.id().to_string(),
        }
    }

    fn new_instance(&self, name: &str) -> DescriptorResult<OrganizationFolder> {
        let navigator = self.delegate.new_instance(Some(name))?.ok_or_else(|| {
            DescriptorError::NameInferenceUnsupported {
                provider_id: self.delegate.id().to_string(),
            }
        })?;

        let mut folder = OrganizationFolder::new(name);
        folder.navigators.push(navigator);
        Ok(folder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::tests::fixtures::TestProvider;

    #[test]
    fn test_metadata_forwards_to_provider() {
        let provider = TestProvider::inferring("github").with_icon_class("icon-github");
        let descriptor = DelegatingDescriptor::new(Arc::new(provider));

        assert_eq!(descriptor.id(), "organization-folder.github");
        assert_eq!(descriptor.display_name(), "github navigator");
        assert_eq!(descriptor.description(), "Scans github");
        assert_eq!(descriptor.category_id(), "nested-projects");
        assert_eq!(descriptor.icon().class_name.as_deref(), Some("icon-github"));
        assert_eq!(
            descriptor.kind(),
            DescriptorKind::Delegating {
                provider_id: "github".to_string()
            }
        );
        assert_eq!(descriptor.to_string(), "DelegatingDescriptor[github]");
    }

    #[test]
    fn test_id_never_collides_with_generic() {
        let descriptor = DelegatingDescriptor::new(Arc::new(TestProvider::inferring("")));
        assert_ne!(descriptor.id(), ORGANIZATION_FOLDER_ID);
        assert!(descriptor.id().starts_with("organization-folder."));
    }

    #[test]
    fn test_new_instance_adds_inferred_navigator() {
        let descriptor = DelegatingDescriptor::new(Arc::new(TestProvider::inferring("github")));

        let folder = descriptor.new_instance("acme").unwrap();

        assert_eq!(folder.name, "acme");
        assert_eq!(folder.navigators.len(), 1);
        assert_eq!(folder.navigators[0].provider_id, "github");
        assert_eq!(folder.navigators[0].name.as_deref(), Some("acme"));
    }

    #[test]
    fn test_new_instance_fails_without_name_inference() {
        let descriptor = DelegatingDescriptor::new(Arc::new(TestProvider::configured("bitbucket")));

        assert_eq!(
            descriptor.new_instance("acme"),
            Err(DescriptorError::NameInferenceUnsupported {
                provider_id: "bitbucket".to_string()
            })
        );
    }

    #[test]
    fn test_provider_failure_propagates() {
        let descriptor = DelegatingDescriptor::new(Arc::new(TestProvider::failing("broken")));

        assert!(matches!(
            descriptor.new_instance("acme"),
            Err(DescriptorError::ProviderFailed { .. })
        ));
    }
}
