//! Host initialization milestones and ordered initializers
//!
//! Components register setup work with the [`initializer!`](crate::initializer)
//! macro, naming the milestone it must run after and the milestone it must
//! complete before. `Host::start` walks the milestones in order and runs each
//! initializer right after its `after` milestone is reached.

use crate::host::error::{HostError, HostResult};
use crate::host::runtime::Host;
use std::future::Future;
use std::pin::Pin;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// Ordered host startup milestones
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, Display)]
pub enum InitMilestone {
    Started,
    PluginsListed,
    PluginsPrepared,
    PluginsStarted,
    ExtensionsAugmented,
    SystemConfigLoaded,
    JobConfigAdapted,
    Completed,
}

/// Future returned by an initializer
pub type InitFuture = Pin<Box<dyn Future<Output = HostResult<()>> + Send>>;

/// Registration record for one initializer
pub struct InitializerInfo {
    pub name: &'static str,
    pub after: InitMilestone,
    pub before: InitMilestone,
    pub run: fn(Host) -> InitFuture,
}

impl std::fmt::Debug for InitializerInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InitializerInfo")
            .field("name", &self.name)
            .field("after", &self.after)
            .field("before", &self.before)
            .finish()
    }
}

inventory::collect!(InitializerInfo);

/// Register an async `fn(Host) -> HostResult<()>` to run between two milestones
#[macro_export]
macro_rules! initializer {
    ($name:expr, after = $after:ident, before = $before:ident, $run:path) => {
        inventory::submit! {
            $crate::host::init::InitializerInfo {
                name: $name,
                after: $crate::host::init::InitMilestone::$after,
                before: $crate::host::init::InitMilestone::$before,
                run: |host| Box::pin($run(host)),
            }
        }
    };
}

/// All initializers registered through the `initializer!` macro
pub fn discover_initializers() -> Vec<&'static InitializerInfo> {
    inventory::iter::<InitializerInfo>().collect()
}

/// Validate initializer windows and group them by the milestone they follow
///
/// Each entry of the result pairs a milestone with the initializers that run
/// once it is reached, in milestone order. Within one milestone initializers
/// are ordered by name so startup is deterministic.
pub fn plan_initializers<'a>(
    initializers: &[&'a InitializerInfo],
) -> HostResult<Vec<(InitMilestone, Vec<&'a InitializerInfo>)>> {
    if let Some(invalid) = initializers.iter().find(|info| info.after >= info.before) {
        return Err(HostError::InitializerOrder {
            name: invalid.name.to_string(),
            after: invalid.after,
            before: invalid.before,
        });
    }

    let plan = InitMilestone::iter()
        .map(|milestone| {
            let mut due: Vec<&InitializerInfo> = initializers
                .iter()
                .copied()
                .filter(|info| info.after == milestone)
                .collect();
            due.sort_by_key(|info| info.name);
            (milestone, due)
        })
        .collect();

    Ok(plan)
}
