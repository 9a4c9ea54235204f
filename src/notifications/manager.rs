//! AsyncNotificationManager implementation

use crate::notifications::error::NotificationError;
use crate::notifications::event::{Event, EventFilter};
use std::collections::HashMap;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Receiving half handed to each subscriber
pub type EventReceiver = UnboundedReceiver<Event>;

#[derive(Debug)]
struct SubscriberInfo {
    filter: EventFilter,
    source: String,
    sender: UnboundedSender<Event>,
}

/// Fan-out bus delivering host events to filtered subscribers
#[derive(Debug)]
pub struct AsyncNotificationManager {
    subscribers: HashMap<String, SubscriberInfo>,
}

impl Default for AsyncNotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AsyncNotificationManager {
    pub fn new() -> Self {
        Self {
            subscribers: HashMap::new(),
        }
    }

    /// Register a subscriber and return its receiving channel
    ///
    /// Subscribing again with the same id replaces the earlier subscription;
    /// its receiver stops getting events.
    pub fn subscribe(
        &mut self,
        subscriber_id: String,
        filter: EventFilter,
        source: String,
    ) -> EventReceiver {
        let (sender, receiver) = unbounded_channel();

        let subscriber_info = SubscriberInfo {
            filter,
            source: source.clone(),
            sender,
        };

        if let Some(existing) = self.subscribers.insert(subscriber_id.clone(), subscriber_info) {
            log::warn!(
                "Subscriber '{}' replaced existing subscription (source: {} -> {})",
                subscriber_id,
                existing.source,
                source
            );
        }

        receiver
    }

    /// Remove a subscriber, returning whether it was registered
    pub fn unsubscribe(&mut self, subscriber_id: &str) -> bool {
        self.subscribers.remove(subscriber_id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn has_subscriber(&self, subscriber_id: &str) -> bool {
        self.subscribers.contains_key(subscriber_id)
    }

    /// Deliver an event to every subscriber whose filter accepts it
    ///
    /// Subscribers whose receiver has been dropped are removed and reported
    /// in the returned error; live subscribers still get the event.
    pub async fn publish(&mut self, event: Event) -> Result<(), NotificationError> {
        let mut failed_subscribers = Vec::new();

        for (subscriber_id, subscriber_info) in &self.subscribers {
            if subscriber_info.filter.accepts(&event)
                && subscriber_info.sender.send(event.clone()).is_err()
            {
                failed_subscribers.push(subscriber_id.clone());
            }
        }

        for subscriber_id in &failed_subscribers {
            log::trace!("Removing subscriber '{}' with closed channel", subscriber_id);
            self.subscribers.remove(subscriber_id);
        }

        if !failed_subscribers.is_empty() {
            return Err(NotificationError::PublishFailed {
                event_type: event.type_name().to_string(),
                failed_subscribers,
            });
        }

        Ok(())
    }
}
