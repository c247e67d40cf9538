use crate::{error::TaskpulseError, shared::auth::protect_realtime_route};
use actix_web::{web, HttpRequest, HttpResponse};
use actix_ws::{Message, Session};
use futures::StreamExt;
use std::time::Duration;
use taskpulse_api_structs::realtime_connect::QueryParams;
use taskpulse_domain::ID;
use taskpulse_infra::{RelayEvent, TaskpulseContext};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

const PING_INTERVAL_SECS: u64 = 30;

/// Upgrades to a websocket that streams the realtime events of the
/// authenticated `User`. Browsers cannot set headers on websocket
/// requests so the session token is given as a query parameter.
pub async fn realtime_connect_controller(
    http_req: HttpRequest,
    body: web::Payload,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<TaskpulseContext>,
) -> Result<HttpResponse, TaskpulseError> {
    let user = protect_realtime_route(&query_params.token, &ctx).await?;

    let (response, session, msg_stream) = actix_ws::handle(&http_req, body).map_err(|e| {
        TaskpulseError::BadClientData(format!("Unable to open realtime connection: {}", e))
    })?;

    let events = ctx.hub.subscribe();
    actix_web::rt::spawn(forward_events(user.id, session, msg_stream, events));

    Ok(response)
}

/// The text frame sent for an event: `{"event": "<name>", "data": <payload>}`
fn frame(event: &RelayEvent) -> String {
    serde_json::json!({
        "event": event.event,
        "data": event.data,
    })
    .to_string()
}

enum NextFrame {
    Send(String),
    Skip,
    Close,
}

/// Decides what to do with an event received from the hub. A lagging
/// connection is closed so that the client reconnects and re-fetches.
fn next_frame(user_id: &ID, received: Result<RelayEvent, RecvError>) -> NextFrame {
    match received {
        Ok(event) if &event.user_id == user_id => NextFrame::Send(frame(&event)),
        Ok(_) => NextFrame::Skip,
        Err(RecvError::Lagged(missed)) => {
            warn!(
                "Realtime connection of user: {} missed {} events, closing it",
                user_id, missed
            );
            NextFrame::Close
        }
        Err(RecvError::Closed) => NextFrame::Close,
    }
}

async fn forward_events(
    user_id: ID,
    mut session: Session,
    mut msg_stream: actix_ws::MessageStream,
    mut events: broadcast::Receiver<RelayEvent>,
) {
    info!("Realtime connection opened for user: {}", user_id);
    let mut ping_interval =
        actix_web::rt::time::interval(Duration::from_secs(PING_INTERVAL_SECS));

    loop {
        tokio::select! {
            event = events.recv() => match next_frame(&user_id, event) {
                NextFrame::Send(frame) => {
                    if session.text(frame).await.is_err() {
                        break;
                    }
                }
                NextFrame::Skip => {}
                NextFrame::Close => break,
            },
            msg = msg_stream.next() => match msg {
                Some(Ok(Message::Ping(bytes))) => {
                    if session.pong(&bytes).await.is_err() {
                        break;
                    }
                }
                Some(Ok(Message::Close(reason))) => {
                    debug!("Realtime connection closed by client: {:?}", reason);
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!("Realtime connection protocol error: {:?}", e);
                    break;
                }
                None => break,
            },
            _ = ping_interval.tick() => {
                if session.ping(b"").await.is_err() {
                    break;
                }
            }
        }
    }

    let _ = session.close(None).await;
    info!("Realtime connection closed for user: {}", user_id);
}
