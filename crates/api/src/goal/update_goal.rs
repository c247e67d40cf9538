use super::subscribers::RelayUpdatedGoal;
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
use taskpulse_api_structs::update_goal::*;
use taskpulse_domain::{Goal, TargetKind, ID};
use taskpulse_infra::TaskpulseContext;

pub async fn update_goal_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    path_params: web::Path<PathParams>,
    ctx: web::Data<TaskpulseContext>,
) -> Result<HttpResponse, TaskpulseError> {
    protect_admin_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = UpdateGoalUseCase {
        goal_id: path_params.goal_id.clone(),
        owner_id: body.owner_id,
        title: body.title,
        end_date: body.end_date,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.goal)))
        .map_err(TaskpulseError::from)
}

#[derive(Debug)]
pub struct UpdateGoalUseCase {
    pub goal_id: ID,
    pub owner_id: ID,
    pub title: String,
    pub end_date: Option<i64>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub goal: Goal,
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
                Self::NotFound(format!("The goal with id: {}, was not found.", id))
            }
            UseCaseError::OwnerNotFound(id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateGoalUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateGoal";

    async fn execute(&mut self, ctx: &TaskpulseContext) -> Result<Self::Response, Self::Error> {
        let mut goal = ctx
            .repos
            .goals
            .find(&self.goal_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or_else(|| UseCaseError::NotFound(self.goal_id.clone()))?;

        let previous_owner_id = if goal.owner_id != self.owner_id {
            match ctx.repos.users.find(&self.owner_id).await {
                Ok(Some(_)) => (),
                Ok(None) => return Err(UseCaseError::OwnerNotFound(self.owner_id.clone())),
                Err(_) => return Err(UseCaseError::StorageError),
            }
            Some(goal.owner_id.clone())
        } else {
            None
        };

        goal.owner_id = self.owner_id.clone();
        goal.title = self.title.clone();
        goal.end_date = self.end_date;
        goal.updated = ctx.sys.get_timestamp_millis();
        ctx.repos
            .goals
            .save(&goal)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        if let Some(previous_owner_id) = &previous_owner_id {
            let delete_reminders = DeleteTargetRemindersUseCase {
                target_id: goal.id.clone(),
                target_kind: TargetKind::Goal,
                owner_id: previous_owner_id.clone(),
            };
            execute(delete_reminders, ctx)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
        }

        let sync_reminder = SyncReminderUseCase {
            target: goal.as_reminder_target(),
            owner_id: goal.owner_id.clone(),
        };
        execute(sync_reminder, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes {
            goal,
            previous_owner_id,
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RelayUpdatedGoal)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{goal::create_goal::CreateGoalUseCase, shared::test_utils::setup_context};
    use taskpulse_domain::User;

    #[actix_web::main]
    #[test]
    async fn goal_reassignment_moves_reminder() {
        let (ctx, relay) = setup_context(0);
        let owner_a = User::new("a@example.com".into(), 0);
        let owner_b = User::new("b@example.com".into(), 0);
        ctx.repos.users.insert(&owner_a).await.unwrap();
        ctx.repos.users.insert(&owner_b).await.unwrap();
        let usecase = CreateGoalUseCase {
            owner_id: owner_a.id.clone(),
            title: "Run a marathon".into(),
            end_date: Some(1750413600000),
        };
        let goal = execute(usecase, &ctx).await.unwrap();

        let usecase = UpdateGoalUseCase {
            goal_id: goal.id.clone(),
            owner_id: owner_b.id.clone(),
            title: goal.title.clone(),
            end_date: goal.end_date,
        };
        execute(usecase, &ctx).await.unwrap();

        let reminders = &ctx.repos.reminders;
        assert!(reminders.find_by_owner(&owner_a.id).await.unwrap().is_empty());
        assert_eq!(reminders.find_by_owner(&owner_b.id).await.unwrap().len(), 1);
        let goal_deleted_to_a = relay
            .events()
            .into_iter()
            .any(|e| e.user_id == owner_a.id && e.event == "goalDeleted");
        assert!(goal_deleted_to_a);
    }

    #[actix_web::main]
    #[test]
    async fn unknown_new_owner_is_rejected() {
        let (ctx, _) = setup_context(0);
        let owner = User::new("a@example.com".into(), 0);
        ctx.repos.users.insert(&owner).await.unwrap();
        let usecase = CreateGoalUseCase {
            owner_id: owner.id.clone(),
            title: "Run a marathon".into(),
            end_date: None,
        };
        let goal = execute(usecase, &ctx).await.unwrap();

        let usecase = UpdateGoalUseCase {
            goal_id: goal.id,
            owner_id: ID::new(),
            title: "Run a marathon".into(),
            end_date: None,
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::OwnerNotFound(_))
        ));
    }
}
