use taskpulse_api_structs::RealtimeEvent;
use taskpulse_domain::ID;
use taskpulse_infra::{RelayEvent, TaskpulseContext};
use tracing::{error, warn};

/// Relays an event to the realtime connections of the given `User`.
///
/// Delivery is best effort, failures are logged and never returned
/// to the caller.
pub async fn emit(event: RealtimeEvent, user_id: &ID, ctx: &TaskpulseContext) {
    let data = match event.data() {
        Ok(data) => data,
        Err(e) => {
            error!("Unable to serialize event: {}. Error: {:?}", event.name(), e);
            return;
        }
    };
    let relay_event = RelayEvent {
        user_id: user_id.clone(),
        event: event.name().to_string(),
        data,
    };
    if let Err(e) = ctx.relay.send(&relay_event).await {
        warn!(
            "Unable to relay event: {} to user: {}. Error: {:?}",
            relay_event.event, user_id, e
        );
    }
}
