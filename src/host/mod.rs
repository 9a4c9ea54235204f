//! Host Module
//!
//! The minimal host surface the descriptor components run inside: ordered
//! init milestones with registered initializers, and the `Host` that owns
//! the registry, the extension sets and the notification bus.

pub(crate) mod error;
pub(crate) mod init;
pub(crate) mod runtime;

// Public API module - the only public interface for the host
pub mod api;

#[cfg(test)]
mod tests;
