use super::subscribers::RelayCreatedTask;
use crate::{
    error::TaskpulseError,
    reminder::sync_reminder::SyncReminderUseCase,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, Subscriber, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use taskpulse_api_structs::create_task::*;
use taskpulse_domain::{Task, ID};
use taskpulse_infra::TaskpulseContext;

pub async fn create_task_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<TaskpulseContext>,
) -> Result<HttpResponse, TaskpulseError> {
    protect_admin_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = CreateTaskUseCase {
        owner_id: body.owner_id,
        title: body.title,
        due_date: body.due_date,
    };

    execute(usecase, &ctx)
        .await
        .map(|task| HttpResponse::Created().json(APIResponse::new(task)))
        .map_err(TaskpulseError::from)
}

#[derive(Debug)]
pub struct CreateTaskUseCase {
    pub owner_id: ID,
    pub title: String,
    pub due_date: Option<i64>,
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
impl UseCase for CreateTaskUseCase {
    type Response = Task;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateTask";

    async fn execute(&mut self, ctx: &TaskpulseContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.users.find(&self.owner_id).await {
            Ok(Some(_)) => (),
            Ok(None) => return Err(UseCaseError::OwnerNotFound(self.owner_id.clone())),
            Err(_) => return Err(UseCaseError::StorageError),
        }

        let task = Task::new(
            self.owner_id.clone(),
            self.title.clone(),
            self.due_date,
            ctx.sys.get_timestamp_millis(),
        );
        ctx.repos
            .tasks
            .insert(&task)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let sync_reminder = SyncReminderUseCase {
            target: task.as_reminder_target(),
            owner_id: task.owner_id.clone(),
        };
        execute(sync_reminder, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(task)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RelayCreatedTask)]
    }
}
