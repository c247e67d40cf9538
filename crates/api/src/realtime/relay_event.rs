use crate::{
    error::TaskpulseError,
    shared::{
        auth::protect_relay_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use taskpulse_api_structs::{relay_event::*, RealtimeEvent};
use taskpulse_domain::ID;
use taskpulse_infra::{RelayEvent, TaskpulseContext};

pub async fn relay_event_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<TaskpulseContext>,
) -> Result<HttpResponse, TaskpulseError> {
    protect_relay_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = PublishRelayEventUseCase {
        user_id: body.user_id,
        event: body.event,
        data: body.data,
    };

    execute(usecase, &ctx)
        .await
        .map(|receivers| HttpResponse::Ok().json(APIResponse { receivers }))
        .map_err(TaskpulseError::from)
}

/// Publishes an event relayed from the scheduling side to the realtime
/// connections of its `User`
#[derive(Debug)]
pub struct PublishRelayEventUseCase {
    pub user_id: ID,
    pub event: String,
    pub data: serde_json::Value,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidEvent(String),
}

impl From<UseCaseError> for TaskpulseError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidEvent(event) => Self::BadClientData(format!(
                "The event: {}, is unknown or has an invalid payload.",
                event
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for PublishRelayEventUseCase {
    type Response = usize;
    type Error = UseCaseError;

    const NAME: &'static str = "PublishRelayEvent";

    async fn execute(&mut self, ctx: &TaskpulseContext) -> Result<Self::Response, Self::Error> {
        if RealtimeEvent::from_parts(&self.event, self.data.clone()).is_err() {
            return Err(UseCaseError::InvalidEvent(self.event.clone()));
        }

        let event = RelayEvent {
            user_id: self.user_id.clone(),
            event: self.event.clone(),
            data: self.data.clone(),
        };
        Ok(ctx.hub.publish(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::setup_context;
    use serde_json::json;

    #[actix_web::main]
    #[test]
    async fn publishes_known_events_to_the_hub() {
        let (ctx, _) = setup_context(0);
        let mut connection = ctx.hub.subscribe();
        let user_id = ID::new();

        let usecase = PublishRelayEventUseCase {
            user_id: user_id.clone(),
            event: "deleteTask".into(),
            data: json!({ "id": ID::new() }),
        };
        assert_eq!(execute(usecase, &ctx).await.unwrap(), 1);

        let received = connection.recv().await.unwrap();
        assert_eq!(received.user_id, user_id);
        assert_eq!(received.event, "deleteTask");
    }

    #[actix_web::main]
    #[test]
    async fn rejects_unknown_events() {
        let (ctx, _) = setup_context(0);
        let usecase = PublishRelayEventUseCase {
            user_id: ID::new(),
            event: "taskExploded".into(),
            data: json!({}),
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::InvalidEvent(_))
        ));
    }
}
