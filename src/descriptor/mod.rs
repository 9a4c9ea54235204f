//! Descriptor System Module
//!
//! The "New Item" descriptor registry, the reconciler that keeps one
//! delegating descriptor per name-inferring navigator provider, and the
//! visibility filter deciding when the generic organization folder entry is
//! listed.

// Internal modules - all access should go through api module
pub(crate) mod delegating;
pub(crate) mod error;
pub(crate) mod extensions;
pub(crate) mod filter;
pub(crate) mod generic;
pub(crate) mod listener;
pub(crate) mod reconcile;
pub(crate) mod registry;
pub(crate) mod traits;
pub(crate) mod types;

// Public API module - the only public interface for the descriptor system
pub mod api;

#[cfg(test)]
pub(crate) mod tests;
