use super::subscribers::RelayUpdatedTask;
use crate::{
    error::TaskpulseError,
    reminder::{
        delete_target_reminders::DeleteTargetRemindersUseCase,
        sync_reminder::SyncReminderUseCase,
    },
    shared::{
        auth::protect_admin_route,
        usecase::{execute, Subscriber, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use taskpulse_api_structs::update_task::*;
use taskpulse_domain::{TargetKind, Task, ID};
use taskpulse_infra::TaskpulseContext;

pub async fn update_task_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    path_params: web::Path<PathParams>,
    ctx: web::Data<TaskpulseContext>,
) -> Result<HttpResponse, TaskpulseError> {
    protect_admin_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = UpdateTaskUseCase {
        task_id: path_params.task_id.clone(),
        owner_id: body.owner_id,
        title: body.title,
        due_date: body.due_date,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.task)))
        .map_err(TaskpulseError::from)
}

/// Updates a `Task`, assigning it to `owner_id` if that is a different `User`
#[derive(Debug)]
pub struct UpdateTaskUseCase {
    pub task_id: ID,
    pub owner_id: ID,
    pub title: String,
    pub due_date: Option<i64>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub task: Task,
    /// Set when the `Task` was reassigned
    pub previous_owner_id: Option<ID>,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    OwnerNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for TaskpulseError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => {
                Self::NotFound(format!("The task with id: {}, was not found.", id))
            }
            UseCaseError::OwnerNotFound(id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateTaskUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateTask";

    async fn execute(&mut self, ctx: &TaskpulseContext) -> Result<Self::Response, Self::Error> {
        let mut task = ctx
            .repos
            .tasks
            .find(&self.task_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or_else(|| UseCaseError::NotFound(self.task_id.clone()))?;

        let previous_owner_id = if task.owner_id != self.owner_id {
            match ctx.repos.users.find(&self.owner_id).await {
                Ok(Some(_)) => (),
                Ok(None) => return Err(UseCaseError::OwnerNotFound(self.owner_id.clone())),
                Err(_) => return Err(UseCaseError::StorageError),
            }
            Some(task.owner_id.clone())
        } else {
            None
        };

        task.owner_id = self.owner_id.clone();
        task.title = self.title.clone();
        task.due_date = self.due_date;
        task.updated = ctx.sys.get_timestamp_millis();
        ctx.repos
            .tasks
            .save(&task)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        if let Some(previous_owner_id) = &previous_owner_id {
            let delete_reminders = DeleteTargetRemindersUseCase {
                target_id: task.id.clone(),
                target_kind: TargetKind::Task,
                owner_id: previous_owner_id.clone(),
            };
            execute(delete_reminders, ctx)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
        }

        let sync_reminder = SyncReminderUseCase {
            target: task.as_reminder_target(),
            owner_id: task.owner_id.clone(),
        };
        execute(sync_reminder, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes {
            task,
            previous_owner_id,
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RelayUpdatedTask)]
    }
}
