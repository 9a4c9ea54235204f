//! Host Error Types

use crate::descriptor::api::DescriptorError;
use crate::host::init::InitMilestone;
use crate::notifications::api::NotificationError;

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("Initializer '{name}' must run after {after} and before {before}, which is not a valid window")]
    InitializerOrder {
        name: String,
        after: InitMilestone,
        before: InitMilestone,
    },

    #[error("Host already started (current milestone: {milestone})")]
    AlreadyStarted { milestone: InitMilestone },

    #[error("Initializer '{name}' failed: {source}")]
    InitializerFailed {
        name: String,
        #[source]
        source: Box<HostError>,
    },

    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    #[error(transparent)]
    Notification(#[from] NotificationError),
}

/// Result type for host operations
pub type HostResult<T> = Result<T, HostError>;

impl crate::core::error_handling::ContextualError for HostError {
    fn is_user_actionable(&self) -> bool {
        match self {
            HostError::Descriptor(err) => err.is_user_actionable(),
            HostError::InitializerFailed { source, .. } => source.is_user_actionable(),
            _ => false,
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            HostError::Descriptor(err) => err.user_message(),
            HostError::InitializerFailed { source, .. } => source.user_message(),
            _ => None,
        }
    }
}
