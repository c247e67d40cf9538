use super::event_relay::RelayEvent;
use tokio::sync::broadcast;
use tracing::debug;

const HUB_CAPACITY: usize = 1024;

/// Fan out of relayed events to the open realtime connections of this process.
///
/// Every connection subscribes to the hub and forwards the events that are
/// addressed to its own `User`.
#[derive(Clone)]
pub struct RealtimeHub {
    sender: broadcast::Sender<RelayEvent>,
}

impl RealtimeHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(HUB_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RelayEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of connections that received the event
    pub fn publish(&self, event: RelayEvent) -> usize {
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(event)) => {
                debug!(
                    "No open realtime connections, dropping event: {}",
                    event.event
                );
                0
            }
        }
    }
}

impl Default for RealtimeHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskpulse_domain::ID;

    #[tokio::test]
    async fn delivers_published_events_to_subscribers() {
        let hub = RealtimeHub::new();
        let event = RelayEvent {
            user_id: ID::new(),
            event: "newReminder".into(),
            data: serde_json::json!({ "id": "1" }),
        };
        assert_eq!(hub.publish(event.clone()), 0);

        let mut receiver = hub.subscribe();
        assert_eq!(hub.publish(event.clone()), 1);
        let received = receiver.recv().await.expect("To receive event");
        assert_eq!(received.event, "newReminder");
        assert_eq!(received.user_id, event.user_id);
    }
}
