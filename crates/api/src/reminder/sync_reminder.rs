use super::subscribers::RelaySyncedReminder;
use crate::shared::usecase::{Subscriber, UseCase};
use taskpulse_domain::{Reminder, ReminderTarget, UserPreferences, ID};
use taskpulse_infra::TaskpulseContext;

/// Keeps the system generated `Reminder` of a target and owner in sync with
/// the deadline of the target and the notification preferences of the owner.
///
/// There is at most one such `Reminder` per (target, owner). Reminders
/// created by users are never touched.
#[derive(Debug)]
pub struct SyncReminderUseCase {
    pub target: ReminderTarget,
    pub owner_id: ID,
}

#[derive(Debug)]
pub enum SyncReminderResponse {
    Created(Reminder),
    Updated(Reminder),
    /// The `Reminder` was already in sync, nothing was written
    Unchanged(Reminder),
    /// The target has no deadline anymore
    Deleted(Vec<Reminder>),
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SyncReminderUseCase {
    type Response = SyncReminderResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "SyncReminder";

    async fn execute(&mut self, ctx: &TaskpulseContext) -> Result<Self::Response, Self::Error> {
        let reminders = &ctx.repos.reminders;
        let deadline = match self.target.deadline {
            Some(deadline) => deadline,
            None => {
                let deleted = reminders
                    .delete_by_target(&self.target.id, self.target.kind, &self.owner_id)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;
                return Ok(SyncReminderResponse::Deleted(deleted));
            }
        };

        let preferences = ctx
            .repos
            .preferences
            .find(&self.owner_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .unwrap_or_else(|| UserPreferences::new(self.owner_id.clone()));
        let remind_at = preferences.remind_at(self.target.kind.reminder_kind(), deadline);
        let delivery_channels = preferences.default_delivery_channels;
        let now = ctx.sys.get_timestamp_millis();

        let existing = reminders
            .find_by_target(&self.target.id, self.target.kind, &self.owner_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        match existing {
            Some(mut reminder) => {
                if !reminder.refresh_from_target(&self.target, remind_at, delivery_channels, now) {
                    return Ok(SyncReminderResponse::Unchanged(reminder));
                }
                let reminder = reminders
                    .upsert(&reminder)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;
                Ok(SyncReminderResponse::Updated(reminder))
            }
            None => {
                let reminder = Reminder::new_for_target(
                    &self.target,
                    &self.owner_id,
                    remind_at,
                    delivery_channels,
                    now,
                );
                let reminder = reminders
                    .upsert(&reminder)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;
                Ok(SyncReminderResponse::Created(reminder))
            }
        }
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RelaySyncedReminder)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{
        test_utils::{setup_context, FailingRelay},
        usecase::execute,
    };
    use std::sync::Arc;
    use taskpulse_domain::{Goal, ReminderKind, ReminderStatus, Task};

    // 2025-06-20T10:00:00Z
    const DUE: i64 = 1750413600000;
    // 2025-06-20T09:00:00Z
    const DUE_MINUS_HOUR: i64 = 1750410000000;
    // 2025-06-21T10:00:00Z
    const NEXT_DAY_DUE: i64 = 1750500000000;
    // 2025-06-21T09:00:00Z
    const NEXT_DAY_DUE_MINUS_HOUR: i64 = 1750496400000;
    const NOW: i64 = 1750000000000;

    async fn sync(task: &Task, ctx: &TaskpulseContext) -> SyncReminderResponse {
        let usecase = SyncReminderUseCase {
            target: task.as_reminder_target(),
            owner_id: task.owner_id.clone(),
        };
        execute(usecase, ctx).await.expect("To sync reminder")
    }

    async fn owner_reminders(owner_id: &ID, ctx: &TaskpulseContext) -> Vec<Reminder> {
        ctx.repos.reminders.find_by_owner(owner_id).await.unwrap()
    }

    #[actix_web::main]
    #[test]
    async fn creates_reminder_at_deadline_minus_lead_time() {
        let (ctx, relay) = setup_context(NOW);
        let task = Task::new(ID::new(), "Ship release".into(), Some(DUE), NOW);

        let res = sync(&task, &ctx).await;
        let reminder = match res {
            SyncReminderResponse::Created(reminder) => reminder,
            other => panic!("Expected created reminder, got: {:?}", other),
        };
        assert_eq!(reminder.remind_at, DUE_MINUS_HOUR);
        assert_eq!(reminder.status, ReminderStatus::Pending);
        assert_eq!(reminder.kind, ReminderKind::TaskDue);
        assert_eq!(reminder.created_by, task.owner_id);
        assert!(!reminder.is_user_created);
        assert_eq!(relay.event_names(), vec!["newReminder"]);
        assert_eq!(relay.events()[0].user_id, task.owner_id);
    }

    #[actix_web::main]
    #[test]
    async fn zero_lead_time_reminds_at_deadline() {
        let (ctx, _) = setup_context(NOW);
        let owner_id = ID::new();
        let mut prefs = UserPreferences::new(owner_id.clone());
        prefs.default_reminder_times.goal_deadline = 0;
        ctx.repos.preferences.save(&prefs).await.unwrap();

        let goal = Goal::new(owner_id.clone(), "Learn Rust".into(), Some(DUE), NOW);
        let usecase = SyncReminderUseCase {
            target: goal.as_reminder_target(),
            owner_id,
        };
        match execute(usecase, &ctx).await.unwrap() {
            SyncReminderResponse::Created(reminder) => {
                assert_eq!(reminder.remind_at, DUE);
                assert_eq!(reminder.kind, ReminderKind::GoalDeadline);
            }
            other => panic!("Expected created reminder, got: {:?}", other),
        }
    }

    #[actix_web::main]
    #[test]
    async fn second_sync_of_unchanged_target_writes_nothing() {
        let (ctx, relay) = setup_context(NOW);
        let task = Task::new(ID::new(), "Ship release".into(), Some(DUE), NOW);
        sync(&task, &ctx).await;
        let before = owner_reminders(&task.owner_id, &ctx).await;

        assert!(matches!(
            sync(&task, &ctx).await,
            SyncReminderResponse::Unchanged(_)
        ));
        assert_eq!(owner_reminders(&task.owner_id, &ctx).await, before);
        assert_eq!(relay.event_names(), vec!["newReminder"]);
    }

    #[actix_web::main]
    #[test]
    async fn moved_deadline_updates_same_reminder_and_resets_snooze() {
        let (ctx, relay) = setup_context(NOW);
        let mut task = Task::new(ID::new(), "Ship release".into(), Some(DUE), NOW);
        sync(&task, &ctx).await;

        let mut reminder = owner_reminders(&task.owner_id, &ctx).await.remove(0);
        let reminder_id = reminder.id.clone();
        reminder.snooze(15, NOW);
        ctx.repos.reminders.save(&reminder).await.unwrap();

        task.due_date = Some(NEXT_DAY_DUE);
        match sync(&task, &ctx).await {
            SyncReminderResponse::Updated(updated) => {
                assert_eq!(updated.id, reminder_id);
                assert_eq!(updated.remind_at, NEXT_DAY_DUE_MINUS_HOUR);
                assert_eq!(updated.status, ReminderStatus::Pending);
                assert_eq!(updated.snooze_until, None);
                assert!(updated.message.contains("2025-06-21 10:00"));
            }
            other => panic!("Expected updated reminder, got: {:?}", other),
        }
        assert_eq!(owner_reminders(&task.owner_id, &ctx).await.len(), 1);
        assert_eq!(relay.event_names(), vec!["newReminder", "reminderUpdated"]);
    }

    #[actix_web::main]
    #[test]
    async fn removed_deadline_leaves_no_reminder() {
        let (ctx, relay) = setup_context(NOW);
        let mut task = Task::new(ID::new(), "Ship release".into(), Some(DUE), NOW);
        sync(&task, &ctx).await;

        task.due_date = None;
        match sync(&task, &ctx).await {
            SyncReminderResponse::Deleted(deleted) => assert_eq!(deleted.len(), 1),
            other => panic!("Expected deleted reminders, got: {:?}", other),
        }
        assert!(owner_reminders(&task.owner_id, &ctx).await.is_empty());
        assert_eq!(relay.event_names(), vec!["newReminder", "reminderDeleted"]);
        assert_eq!(
            relay.events()[1].data["targetId"],
            serde_json::json!(task.id.to_string())
        );
    }

    #[actix_web::main]
    #[test]
    async fn keeps_repeat_interval_and_email_override() {
        let (ctx, _) = setup_context(NOW);
        let mut task = Task::new(ID::new(), "Ship release".into(), Some(DUE), NOW);
        sync(&task, &ctx).await;

        let mut reminder = owner_reminders(&task.owner_id, &ctx).await.remove(0);
        reminder.set_repeat_interval(Some(30)).unwrap();
        reminder
            .set_email_override(Some("lead@example.com".into()))
            .unwrap();
        ctx.repos.reminders.save(&reminder).await.unwrap();

        task.title = "Ship release 2.0".into();
        task.due_date = Some(NEXT_DAY_DUE);
        sync(&task, &ctx).await;

        let reminder = owner_reminders(&task.owner_id, &ctx).await.remove(0);
        assert_eq!(reminder.repeat_interval, Some(30));
        assert_eq!(reminder.email_override, Some("lead@example.com".into()));
        assert!(reminder.message.contains("Ship release 2.0"));
    }

    #[actix_web::main]
    #[test]
    async fn never_touches_user_created_reminders() {
        let (ctx, _) = setup_context(NOW);
        let mut task = Task::new(ID::new(), "Ship release".into(), Some(DUE), NOW);
        let mut user_created = Reminder::new_for_target(
            &task.as_reminder_target(),
            &task.owner_id,
            NOW,
            Default::default(),
            NOW,
        );
        user_created.is_user_created = true;
        ctx.repos.reminders.insert(&user_created).await.unwrap();

        sync(&task, &ctx).await;
        assert_eq!(owner_reminders(&task.owner_id, &ctx).await.len(), 2);

        task.due_date = None;
        sync(&task, &ctx).await;
        let remaining = owner_reminders(&task.owner_id, &ctx).await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0], user_created);
    }

    #[actix_web::main]
    #[test]
    async fn creates_reminders_with_past_remind_at() {
        let (ctx, _) = setup_context(DUE);
        let task = Task::new(ID::new(), "Overdue".into(), Some(DUE - 1000), DUE);
        assert!(matches!(
            sync(&task, &ctx).await,
            SyncReminderResponse::Created(_)
        ));
    }

    #[actix_web::main]
    #[test]
    async fn relay_failure_does_not_fail_sync() {
        let (mut ctx, _) = setup_context(NOW);
        ctx.relay = Arc::new(FailingRelay);
        let task = Task::new(ID::new(), "Ship release".into(), Some(DUE), NOW);

        let usecase = SyncReminderUseCase {
            target: task.as_reminder_target(),
            owner_id: task.owner_id.clone(),
        };
        let res = execute(usecase, &ctx).await;
        assert!(matches!(res, Ok(SyncReminderResponse::Created(_))));
        assert_eq!(owner_reminders(&task.owner_id, &ctx).await.len(), 1);
    }
}
