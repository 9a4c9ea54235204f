//! Public API for the host

pub use crate::host::error::{HostError, HostResult};
pub use crate::host::init::{
    discover_initializers, plan_initializers, InitFuture, InitMilestone, InitializerInfo,
};
pub use crate::host::runtime::Host;
