//! Public API for output

pub use crate::output::error::{OutputError, OutputResult};
pub use crate::output::rewindable::RewindableFileWriter;
