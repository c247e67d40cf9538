use super::{find_owned_reminder, subscribers::RelayUpdatedReminder};
use crate::{
    error::TaskpulseError,
    shared::{
        auth::protect_route,
        usecase::{execute, Subscriber, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use taskpulse_api_structs::dismiss_reminder::*;
use taskpulse_domain::{Reminder, ID};
use taskpulse_infra::TaskpulseContext;

pub async fn dismiss_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<TaskpulseContext>,
) -> Result<HttpResponse, TaskpulseError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = DismissReminderUseCase {
        owner_id: user.id,
        reminder_id: path_params.reminder_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(TaskpulseError::from)
}

#[derive(Debug)]
pub struct DismissReminderUseCase {
    pub owner_id: ID,
    pub reminder_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for TaskpulseError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => {
                Self::NotFound(format!("The reminder with id: {}, was not found.", id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DismissReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "DismissReminder";

    async fn execute(&mut self, ctx: &TaskpulseContext) -> Result<Self::Response, Self::Error> {
        let mut reminder = find_owned_reminder(&self.reminder_id, &self.owner_id, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))?;

        reminder.dismiss(ctx.sys.get_timestamp_millis());
        ctx.repos
            .reminders
            .save(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RelayUpdatedReminder)]
    }
}
