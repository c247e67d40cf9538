mod event_relay;
mod notifier;
mod realtime;

pub use event_relay::{
    HttpEventRelay, HubEventRelay, IEventRelay, RelayEvent, RELAY_SECRET_HEADER,
};
pub use notifier::{INotificationSender, TracingNotificationSender};
pub use realtime::RealtimeHub;
