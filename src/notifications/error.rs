//! Notification Error Types

/// Delivery failure on the notification bus
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NotificationError {
    /// Some subscribers had dropped their receivers; they were unsubscribed
    #[error("{event_type} event not delivered to {} subscriber(s): {}", failed_subscribers.len(), failed_subscribers.join(", "))]
    PublishFailed {
        event_type: String,
        failed_subscribers: Vec<String>,
    },
}

impl crate::core::error_handling::ContextualError for NotificationError {
    fn is_user_actionable(&self) -> bool {
        false
    }

    fn user_message(&self) -> Option<&str> {
        None
    }
}
