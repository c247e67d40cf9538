use crate::shared::usecase::{execute, UseCase};
use crate::{error::TaskpulseError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use taskpulse_api_structs::set_push_token::*;
use taskpulse_domain::User;
use taskpulse_infra::TaskpulseContext;

pub async fn set_push_token_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<TaskpulseContext>,
) -> Result<HttpResponse, TaskpulseError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = SetPushTokenUseCase {
        user,
        push_token: body.0.push_token,
    };

    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Ok().json(APIResponse::new(user)))
        .map_err(TaskpulseError::from)
}

/// Sets or clears the device token push notifications are sent to
#[derive(Debug)]
pub struct SetPushTokenUseCase {
    pub user: User,
    pub push_token: Option<String>,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for TaskpulseError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetPushTokenUseCase {
    type Response = User;
    type Error = UseCaseError;

    const NAME: &'static str = "SetPushToken";

    async fn execute(&mut self, ctx: &TaskpulseContext) -> Result<Self::Response, Self::Error> {
        let mut user = self.user.clone();
        user.push_token = self
            .push_token
            .as_ref()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        ctx.repos
            .users
            .save(&user)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        Ok(user)
    }
}
