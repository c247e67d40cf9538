use super::subscribers::RelayDeletedTask;
use crate::{
    error::TaskpulseError,
    reminder::delete_target_reminders::DeleteTargetRemindersUseCase,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, Subscriber, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use taskpulse_api_structs::delete_task::*;
use taskpulse_domain::{TargetKind, Task, ID};
use taskpulse_infra::TaskpulseContext;

pub async fn delete_task_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<TaskpulseContext>,
) -> Result<HttpResponse, TaskpulseError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = DeleteTaskUseCase {
        task_id: path_params.task_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|task| HttpResponse::Ok().json(APIResponse::new(task)))
        .map_err(TaskpulseError::from)
}

#[derive(Debug)]
pub struct DeleteTaskUseCase {
    pub task_id: ID,
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
                Self::NotFound(format!("The task with id: {}, was not found.", id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteTaskUseCase {
    type Response = Task;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteTask";

    async fn execute(&mut self, ctx: &TaskpulseContext) -> Result<Self::Response, Self::Error> {
        let task = ctx
            .repos
            .tasks
            .delete(&self.task_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or_else(|| UseCaseError::NotFound(self.task_id.clone()))?;

        let delete_reminders = DeleteTargetRemindersUseCase {
            target_id: task.id.clone(),
            target_kind: TargetKind::Task,
            owner_id: task.owner_id.clone(),
        };
        execute(delete_reminders, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(task)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RelayDeletedTask)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        reminder::get_reminders::GetRemindersUseCase, shared::test_utils::setup_context,
        task::create_task::CreateTaskUseCase,
    };
    use taskpulse_domain::User;

    #[actix_web::main]
    #[test]
    async fn deleted_task_leaves_no_reminder() {
        let (ctx, relay) = setup_context(0);
        let user = User::new("kari@example.com".into(), 0);
        ctx.repos.users.insert(&user).await.unwrap();
        let usecase = CreateTaskUseCase {
            owner_id: user.id.clone(),
            title: "Ship release".into(),
            due_date: Some(1750413600000),
        };
        let task = execute(usecase, &ctx).await.unwrap();

        let usecase = DeleteTaskUseCase {
            task_id: task.id.clone(),
        };
        execute(usecase, &ctx).await.unwrap();

        let reminders = execute(
            GetRemindersUseCase {
                user_id: user.id.clone(),
            },
            &ctx,
        )
        .await
        .unwrap();
        assert!(reminders.is_empty());
        assert!(ctx.repos.tasks.find(&task.id).await.unwrap().is_none());
        assert_eq!(
            relay.event_names(),
            vec!["newReminder", "newTask", "reminderDeleted", "deleteTask"]
        );

        let usecase = DeleteTaskUseCase { task_id: task.id };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::NotFound(_))
        ));
    }
}
