use crate::{
    error::TaskpulseError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use taskpulse_api_structs::get_reminders::*;
use taskpulse_domain::{Reminder, ID};
use taskpulse_infra::TaskpulseContext;

pub async fn get_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<TaskpulseContext>,
) -> Result<HttpResponse, TaskpulseError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetRemindersUseCase { user_id: user.id };
    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders)))
        .map_err(TaskpulseError::from)
}

#[derive(Debug)]
pub struct GetRemindersUseCase {
    pub user_id: ID,
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
impl UseCase for GetRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminders";

    async fn execute(&mut self, ctx: &TaskpulseContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .reminders
            .find_by_owner(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
