use super::subscribers::RelayDeletedTargetReminders;
use crate::shared::usecase::{Subscriber, UseCase};
use taskpulse_domain::{Reminder, TargetKind, ID};
use taskpulse_infra::TaskpulseContext;

/// Removes the system generated reminders of a target for an owner,
/// e.g. when the target is deleted or reassigned to someone else
#[derive(Debug)]
pub struct DeleteTargetRemindersUseCase {
    pub target_id: ID,
    pub target_kind: TargetKind,
    pub owner_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteTargetRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteTargetReminders";

    async fn execute(&mut self, ctx: &TaskpulseContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .reminders
            .delete_by_target(&self.target_id, self.target_kind, &self.owner_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RelayDeletedTargetReminders)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{test_utils::setup_context, usecase::execute};
    use taskpulse_domain::Goal;

    #[actix_web::main]
    #[test]
    async fn deletes_only_reminders_of_target_and_owner() {
        let (ctx, relay) = setup_context(0);
        let goal = Goal::new(ID::new(), "Learn Rust".into(), Some(1000), 0);
        let other_goal = Goal::new(goal.owner_id.clone(), "Run".into(), Some(1000), 0);
        for g in [&goal, &other_goal] {
            let reminder = Reminder::new_for_target(
                &g.as_reminder_target(),
                &g.owner_id,
                500,
                Default::default(),
                0,
            );
            ctx.repos.reminders.upsert(&reminder).await.unwrap();
        }

        let usecase = DeleteTargetRemindersUseCase {
            target_id: goal.id.clone(),
            target_kind: TargetKind::Goal,
            owner_id: goal.owner_id.clone(),
        };
        let deleted = execute(usecase, &ctx).await.unwrap();
        assert_eq!(deleted.len(), 1);
        assert_eq!(deleted[0].target_id, Some(goal.id.clone()));

        let remaining = ctx.repos.reminders.find_by_owner(&goal.owner_id).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].target_id, Some(other_goal.id.clone()));
        assert_eq!(relay.event_names(), vec!["reminderDeleted"]);

        // Nothing left to delete
        let usecase = DeleteTargetRemindersUseCase {
            target_id: goal.id.clone(),
            target_kind: TargetKind::Goal,
            owner_id: goal.owner_id.clone(),
        };
        assert!(execute(usecase, &ctx).await.unwrap().is_empty());
        assert_eq!(relay.event_names().len(), 1);
    }
}
