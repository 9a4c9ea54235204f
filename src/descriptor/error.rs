//! Descriptor Error Types

use crate::notifications::api::ExtensionKind;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DescriptorError {
    /// A provider failed while synthesizing a navigator
    #[error("Provider '{provider_id}' failed: {cause}")]
    ProviderFailed { provider_id: String, cause: String },

    /// The provider cannot build a navigator from a name alone
    #[error("Provider '{provider_id}' cannot infer a navigator from a name")]
    NameInferenceUnsupported { provider_id: String },

    #[error("An item descriptor with id '{id}' is already registered")]
    DuplicateDescriptor { id: String },

    #[error("No item descriptor registered with id '{id}'")]
    DescriptorNotFound { id: String },

    #[error("A {kind} extension with id '{id}' is already installed")]
    DuplicateExtension { kind: ExtensionKind, id: String },

    #[error("No {kind} extension installed with id '{id}'")]
    ExtensionNotFound { kind: ExtensionKind, id: String },

    #[error("{message}")]
    Synchronisation { message: String },
}

/// Result type for descriptor operations
pub type DescriptorResult<T> = Result<T, DescriptorError>;

impl DescriptorError {
    pub(crate) fn synchronisation(message: String) -> Self {
        DescriptorError::Synchronisation { message }
    }
}

impl crate::core::error_handling::ContextualError for DescriptorError {
    fn is_user_actionable(&self) -> bool {
        matches!(
            self,
            DescriptorError::NameInferenceUnsupported { .. }
                | DescriptorError::DuplicateDescriptor { .. }
                | DescriptorError::DescriptorNotFound { .. }
                | DescriptorError::DuplicateExtension { .. }
                | DescriptorError::ExtensionNotFound { .. }
        )
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            DescriptorError::NameInferenceUnsupported { .. } => {
                Some("The selected provider needs additional configuration and cannot create an item from a name alone")
            }
            DescriptorError::DuplicateDescriptor { .. } => {
                Some("An item descriptor with the same id is already registered")
            }
            DescriptorError::DescriptorNotFound { .. } => {
                Some("No item descriptor is registered with the requested id")
            }
            DescriptorError::DuplicateExtension { .. } => {
                Some("An extension with the same id is already installed")
            }
            DescriptorError::ExtensionNotFound { .. } => {
                Some("No extension is installed with the requested id")
            }
            _ => None,
        }
    }
}
