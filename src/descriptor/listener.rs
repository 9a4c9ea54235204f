//! Reactive reconciliation
//!
//! Provider and factory changes arrive on one merged subscription
//! (`EventFilter::ExtensionOnly`). Each wake-up drains whatever else is
//! already queued and reconciles once, then reports the result as a
//! `RegistryEvent`.

use crate::descriptor::reconcile::Reconciler;
use crate::host::error::HostResult;
use crate::host::runtime::Host;
use crate::notifications::api::{
    Event, EventFilter, EventReceiver, RegistryEvent, SharedNotificationManager,
};
use tokio::task::JoinHandle;

pub const RECONCILER_SUBSCRIBER_ID: &str = "descriptor-reconciler";

/// Subscribe the reconciler to changes of either extension kind
pub async fn subscribe_reconciler(notifications: &SharedNotificationManager) -> EventReceiver {
    notifications.lock().await.subscribe(
        RECONCILER_SUBSCRIBER_ID.to_string(),
        EventFilter::ExtensionOnly,
        "descriptor:reconcile".to_string(),
    )
}

/// Reconcile on every extension change until the subscription closes
pub fn spawn_reconcile_listener(
    reconciler: Reconciler,
    mut receiver: EventReceiver,
    notifications: SharedNotificationManager,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = receiver.recv().await {
            let mut pending = 1;
            while receiver.try_recv().is_ok() {
                pending += 1;
            }
            log::trace!("{} extension change(s), latest: {:?}", pending, event);

            let report = match reconciler.reconcile() {
                Ok(outcome) => RegistryEvent::reconciled(outcome.added, outcome.removed),
                Err(e) => {
                    log::error!("Descriptor reconciliation failed: {}", e);
                    RegistryEvent::failed(e.to_string())
                }
            };

            if let Err(e) = notifications
                .lock()
                .await
                .publish(Event::Registry(report))
                .await
            {
                log::warn!("Reconciliation result not delivered: {}", e);
            }
        }
        log::debug!("reconcile listener stopped");
    })
}

/// Offer per-provider "New Item" entries and keep them current
///
/// Subscribes before the first pass so that no change made in between is
/// missed.
async fn install_delegating_descriptors(host: Host) -> HostResult<()> {
    log::debug!("ran install_delegating_descriptors");

    let receiver = subscribe_reconciler(host.notifications()).await;
    let reconciler = host.reconciler();
    reconciler.reconcile()?;

    let handle = spawn_reconcile_listener(reconciler, receiver, host.notifications().clone());
    host.attach_task(handle);
    Ok(())
}

crate::initializer!(
    "descriptor::install_delegating_descriptors",
    after = PluginsStarted,
    before = ExtensionsAugmented,
    install_delegating_descriptors
);
