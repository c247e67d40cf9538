use super::Command;
use futures::StreamExt;
use std::time::Duration;
use taskpulse_api_structs::RealtimeEvent;
use tokio::sync::mpsc::WeakSender;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};
use url::Url;

/// Delay before reconnecting, doubled after every failed attempt
#[derive(Debug, Clone, Copy)]
pub struct Backoff {
    pub initial: Duration,
    pub max: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            initial: Duration::from_secs(1),
            max: Duration::from_secs(30),
        }
    }
}

/// Sends to the session actor, returns false when the session has stopped
async fn forward(inbox: &WeakSender<Command>, command: Command) -> bool {
    match inbox.upgrade() {
        Some(sender) => sender.send(command).await.is_ok(),
        None => false,
    }
}

/// Keeps a realtime channel open and forwards its events to the session actor
pub(super) async fn run_channel(url: Url, inbox: WeakSender<Command>, backoff: Backoff) {
    let mut delay = backoff.initial;
    loop {
        match connect_async(url.as_str()).await {
            Ok((mut stream, _)) => {
                info!("Realtime channel opened");
                delay = backoff.initial;
                if !forward(&inbox, Command::ChannelOpened).await {
                    return;
                }

                while let Some(msg) = stream.next().await {
                    match msg {
                        Ok(Message::Text(text)) => {
                            match serde_json::from_str::<RealtimeEvent>(&text) {
                                Ok(event) => {
                                    if !forward(&inbox, Command::Realtime(event)).await {
                                        return;
                                    }
                                }
                                Err(e) => {
                                    debug!("Ignoring realtime message: {}. Error: {}", text, e)
                                }
                            }
                        }
                        Ok(Message::Close(_)) => break,
                        Ok(_) => {}
                        Err(e) => {
                            warn!("Realtime channel failed: {}", e);
                            break;
                        }
                    }
                }

                if !forward(&inbox, Command::ChannelDropped).await {
                    return;
                }
            }
            Err(e) => {
                warn!("Unable to open realtime channel: {}", e);
                if !forward(&inbox, Command::ChannelDropped).await {
                    return;
                }
            }
        }

        debug!("Reconnecting realtime channel in {:?}", delay);
        tokio::time::sleep(delay).await;
        delay = std::cmp::min(delay * 2, backoff.max);
    }
}
