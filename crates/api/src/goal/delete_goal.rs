use super::subscribers::RelayDeletedGoal;
use crate::{
    error::TaskpulseError,
    reminder::delete_target_reminders::DeleteTargetRemindersUseCase,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, Subscriber, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use taskpulse_api_structs::delete_goal::*;
use taskpulse_domain::{Goal, TargetKind, ID};
use taskpulse_infra::TaskpulseContext;
use tracing::error;

pub async fn delete_goal_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<TaskpulseContext>,
) -> Result<HttpResponse, TaskpulseError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = DeleteGoalUseCase {
        goal_id: path_params.goal_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|goal| HttpResponse::Ok().json(APIResponse::new(goal)))
        .map_err(TaskpulseError::from)
}

/// Deletes a `Goal`. Removing its reminders is best effort, a failure
/// there does not fail the deletion of the `Goal`.
#[derive(Debug)]
pub struct DeleteGoalUseCase {
    pub goal_id: ID,
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
                Self::NotFound(format!("The goal with id: {}, was not found.", id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteGoalUseCase {
    type Response = Goal;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteGoal";

    async fn execute(&mut self, ctx: &TaskpulseContext) -> Result<Self::Response, Self::Error> {
        let goal = ctx
            .repos
            .goals
            .delete(&self.goal_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or_else(|| UseCaseError::NotFound(self.goal_id.clone()))?;

        let delete_reminders = DeleteTargetRemindersUseCase {
            target_id: goal.id.clone(),
            target_kind: TargetKind::Goal,
            owner_id: goal.owner_id.clone(),
        };
        if let Err(e) = execute(delete_reminders, ctx).await {
            error!(
                "Unable to delete the reminders of goal: {}. Error: {:?}",
                goal.id, e
            );
        }

        Ok(goal)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RelayDeletedGoal)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{goal::create_goal::CreateGoalUseCase, shared::test_utils::setup_context};
    use taskpulse_domain::User;

    #[actix_web::main]
    #[test]
    async fn deleted_goal_leaves_no_reminder() {
        let (ctx, relay) = setup_context(0);
        let user = User::new("kari@example.com".into(), 0);
        ctx.repos.users.insert(&user).await.unwrap();
        let usecase = CreateGoalUseCase {
            owner_id: user.id.clone(),
            title: "Run a marathon".into(),
            end_date: Some(1750413600000),
        };
        let goal = execute(usecase, &ctx).await.unwrap();

        execute(
            DeleteGoalUseCase {
                goal_id: goal.id.clone(),
            },
            &ctx,
        )
        .await
        .unwrap();

        assert!(ctx
            .repos
            .reminders
            .find_by_owner(&user.id)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            relay.event_names(),
            vec!["newReminder", "newGoal", "reminderDeleted", "goalDeleted"]
        );
    }
}
