//! Event types for the notification system

use std::fmt;
use std::time::SystemTime;

use crate::host::init::InitMilestone;

/// Kind of extension whose installed set changed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExtensionKind {
    /// Navigator providers (one "New Item" entry each when name inference works)
    Provider,
    /// Project factories; at least one must be installed for delegation
    Factory,
}

impl fmt::Display for ExtensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtensionKind::Provider => write!(f, "provider"),
            ExtensionKind::Factory => write!(f, "factory"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExtensionChange {
    Installed,
    Uninstalled,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RegistryEventType {
    Reconciled,
    ReconcileFailed,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SystemEventType {
    Milestone(InitMilestone),
    Shutdown,
}

/// An extension of one kind was installed or removed
#[derive(Clone, Debug)]
pub struct ExtensionEvent {
    pub kind: ExtensionKind,
    pub change: ExtensionChange,
    pub timestamp: SystemTime,
    pub extension_id: String,
}

impl ExtensionEvent {
    pub fn new(kind: ExtensionKind, change: ExtensionChange, extension_id: String) -> Self {
        Self {
            kind,
            change,
            timestamp: SystemTime::now(),
            extension_id,
        }
    }
}

/// The descriptor registry finished (or failed) a reconciliation pass
#[derive(Clone, Debug)]
pub struct RegistryEvent {
    pub event_type: RegistryEventType,
    pub timestamp: SystemTime,
    /// Ids of the delegating descriptors registered by this pass
    pub added: Vec<String>,
    /// Number of delegating descriptors cleared by this pass
    pub removed: usize,
    pub message: Option<String>,
}

impl RegistryEvent {
    pub fn reconciled(added: Vec<String>, removed: usize) -> Self {
        Self {
            event_type: RegistryEventType::Reconciled,
            timestamp: SystemTime::now(),
            added,
            removed,
            message: None,
        }
    }

    pub fn failed(message: String) -> Self {
        Self {
            event_type: RegistryEventType::ReconcileFailed,
            timestamp: SystemTime::now(),
            added: Vec::new(),
            removed: 0,
            message: Some(message),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SystemEvent {
    pub event_type: SystemEventType,
    pub timestamp: SystemTime,
    pub message: Option<String>,
}

impl SystemEvent {
    pub fn new(event_type: SystemEventType) -> Self {
        Self {
            event_type,
            timestamp: SystemTime::now(),
            message: None,
        }
    }

    pub fn with_message(event_type: SystemEventType, message: String) -> Self {
        Self {
            event_type,
            timestamp: SystemTime::now(),
            message: Some(message),
        }
    }
}

/// Unified event enum that encompasses all event types
#[derive(Clone, Debug)]
pub enum Event {
    Extension(ExtensionEvent),
    Registry(RegistryEvent),
    System(SystemEvent),
}

impl Event {
    pub fn type_name(&self) -> &'static str {
        match self {
            Event::Extension(_) => "Extension",
            Event::Registry(_) => "Registry",
            Event::System(_) => "System",
        }
    }
}

/// Event filtering options for subscribers
#[derive(Clone, Debug, PartialEq)]
pub enum EventFilter {
    /// Changes to either extension kind, merged into one stream
    ExtensionOnly,
    RegistryOnly,
    SystemOnly,
    All,
}

impl EventFilter {
    /// Check if an event should be accepted by this filter
    pub fn accepts(&self, event: &Event) -> bool {
        matches!(
            (self, event),
            (EventFilter::ExtensionOnly, Event::Extension(_))
                | (EventFilter::RegistryOnly, Event::Registry(_))
                | (EventFilter::SystemOnly, Event::System(_))
                | (EventFilter::All, _)
        )
    }
}
