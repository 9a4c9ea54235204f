//! Output Module
//!
//! A buffered file writer that opens its target lazily and can be rewound to
//! start the file over.

pub(crate) mod error;
pub(crate) mod rewindable;

// Public API module - the only public interface for output
pub mod api;
