use super::subscribers::RelayCreatedGoal;
use crate::{
    error::TaskpulseError,
    reminder::sync_reminder::SyncReminderUseCase,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, Subscriber, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use taskpulse_api_structs::create_goal::*;
use taskpulse_domain::{Goal, ID};
use taskpulse_infra::TaskpulseContext;

pub async fn create_goal_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<TaskpulseContext>,
) -> Result<HttpResponse, TaskpulseError> {
    protect_admin_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = CreateGoalUseCase {
        owner_id: body.owner_id,
        title: body.title,
        end_date: body.end_date,
    };

    execute(usecase, &ctx)
        .await
        .map(|goal| HttpResponse::Created().json(APIResponse::new(goal)))
        .map_err(TaskpulseError::from)
}

#[derive(Debug)]
pub struct CreateGoalUseCase {
    pub owner_id: ID,
    pub title: String,
    pub end_date: Option<i64>,
}

#[derive(Debug)]
pub enum UseCaseError {
    OwnerNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for TaskpulseError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::OwnerNotFound(id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateGoalUseCase {
    type Response = Goal;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateGoal";

    async fn execute(&mut self, ctx: &TaskpulseContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.users.find(&self.owner_id).await {
            Ok(Some(_)) => (),
            Ok(None) => return Err(UseCaseError::OwnerNotFound(self.owner_id.clone())),
            Err(_) => return Err(UseCaseError::StorageError),
        }

        let goal = Goal::new(
            self.owner_id.clone(),
            self.title.clone(),
            self.end_date,
            ctx.sys.get_timestamp_millis(),
        );
        ctx.repos
            .goals
            .insert(&goal)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let sync_reminder = SyncReminderUseCase {
            target: goal.as_reminder_target(),
            owner_id: goal.owner_id.clone(),
        };
        execute(sync_reminder, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(goal)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RelayCreatedGoal)]
    }
}
