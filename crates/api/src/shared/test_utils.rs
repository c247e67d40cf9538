use std::sync::{Arc, Mutex};
use taskpulse_domain::Reminder;
use taskpulse_infra::{IEventRelay, INotificationSender, ISys, RelayEvent, TaskpulseContext};

pub struct StaticTimeSys(pub i64);
impl ISys for StaticTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.0
    }
}

/// Keeps every relayed event so that tests can inspect them
#[derive(Default)]
pub struct RecordingRelay {
    events: Mutex<Vec<RelayEvent>>,
}

impl RecordingRelay {
    pub fn event_names(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.event.clone())
            .collect()
    }

    pub fn events(&self) -> Vec<RelayEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl IEventRelay for RecordingRelay {
    async fn send(&self, event: &RelayEvent) -> anyhow::Result<()> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

pub struct FailingRelay;

#[async_trait::async_trait]
impl IEventRelay for FailingRelay {
    async fn send(&self, _event: &RelayEvent) -> anyhow::Result<()> {
        Err(anyhow::Error::msg("Relay is unreachable"))
    }
}

/// Inmemory context at a fixed time which records the relayed events
pub fn setup_context(now: i64) -> (TaskpulseContext, Arc<RecordingRelay>) {
    let mut ctx = TaskpulseContext::create_inmemory();
    let relay = Arc::new(RecordingRelay::default());
    ctx.sys = Arc::new(StaticTimeSys(now));
    ctx.relay = relay.clone();
    (ctx, relay)
}

/// Keeps every sent notification as (channel, recipient, reminder message)
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String, String)>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<(String, String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl INotificationSender for RecordingNotifier {
    async fn send_email(&self, to: &str, reminder: &Reminder) -> anyhow::Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push(("email".into(), to.into(), reminder.message.clone()));
        Ok(())
    }

    async fn send_push(&self, push_token: &str, reminder: &Reminder) -> anyhow::Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push(("push".into(), push_token.into(), reminder.message.clone()));
        Ok(())
    }
}
