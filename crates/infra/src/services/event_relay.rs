use super::realtime::RealtimeHub;
use crate::config::RelayConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use taskpulse_domain::ID;
use url::Url;

/// An event addressed to the realtime connections of a `User`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayEvent {
    pub user_id: ID,
    pub event: String,
    pub data: serde_json::Value,
}

/// Transport that forwards reminder and target events to the user facing service.
///
/// Delivery is at most once. Callers are expected to log and ignore errors.
#[async_trait::async_trait]
pub trait IEventRelay: Send + Sync {
    async fn send(&self, event: &RelayEvent) -> anyhow::Result<()>;
}

pub const RELAY_SECRET_HEADER: &str = "x-relay-secret";

/// Relays events to a remote user facing service over http
pub struct HttpEventRelay {
    client: Client,
    url: Url,
    secret: String,
}

impl HttpEventRelay {
    pub fn new(base_url: &Url, config: &RelayConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_millis))
            .build()?;
        let url = base_url.join("api/v1/relay/events")?;
        Ok(Self {
            client,
            url,
            secret: config.secret.clone(),
        })
    }
}

#[async_trait::async_trait]
impl IEventRelay for HttpEventRelay {
    async fn send(&self, event: &RelayEvent) -> anyhow::Result<()> {
        let res = self
            .client
            .post(self.url.clone())
            .header(RELAY_SECRET_HEADER, &self.secret)
            .json(event)
            .send()
            .await?;
        let status = res.status();
        if !status.is_success() {
            return Err(anyhow::Error::msg(format!(
                "Relay responded with status: {} for event: {}",
                status, event.event
            )));
        }
        Ok(())
    }
}

/// Relays events to the realtime hub of the current process
pub struct HubEventRelay {
    hub: RealtimeHub,
}

impl HubEventRelay {
    pub fn new(hub: RealtimeHub) -> Self {
        Self { hub }
    }
}

#[async_trait::async_trait]
impl IEventRelay for HubEventRelay {
    async fn send(&self, event: &RelayEvent) -> anyhow::Result<()> {
        self.hub.publish(event.clone());
        Ok(())
    }
}
