//! Notification System Module
//!
//! Fan-out of host events (extension changes, registry reconciliation,
//! init milestones) over unbounded tokio channels.

// Internal modules - all access should go through api module
pub(crate) mod error;
pub(crate) mod event;
pub(crate) mod manager;

// Public API module - the only public interface for the notification system
pub mod api;
