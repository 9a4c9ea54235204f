//! Public API for the notification system
//!
//! External modules should import from here rather than directly from
//! internal modules. There is no global instance: the host owns the manager
//! and hands clones of the `Arc` to the components that publish.

pub use crate::notifications::error::NotificationError;
pub use crate::notifications::event::{
    Event, EventFilter, ExtensionChange, ExtensionEvent, ExtensionKind, RegistryEvent,
    RegistryEventType, SystemEvent, SystemEventType,
};
pub use crate::notifications::manager::{AsyncNotificationManager, EventReceiver};

/// Shared handle to a notification manager
pub type SharedNotificationManager =
    std::sync::Arc<tokio::sync::Mutex<AsyncNotificationManager>>;

/// Create a fresh shared notification manager
pub fn new_notification_service() -> SharedNotificationManager {
    log::trace!("Initializing notification service");
    std::sync::Arc::new(tokio::sync::Mutex::new(AsyncNotificationManager::new()))
}
