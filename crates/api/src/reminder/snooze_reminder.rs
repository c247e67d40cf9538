use super::{find_owned_reminder, subscribers::RelayUpdatedReminder};
use crate::{
    error::TaskpulseError,
    shared::{
        auth::protect_route,
        usecase::{execute, Subscriber, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use taskpulse_api_structs::snooze_reminder::*;
use taskpulse_domain::{validation::MAX_OFFSET_MINUTES, Reminder, ID};
use taskpulse_infra::TaskpulseContext;

pub async fn snooze_reminder_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    path_params: web::Path<PathParams>,
    ctx: web::Data<TaskpulseContext>,
) -> Result<HttpResponse, TaskpulseError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = SnoozeReminderUseCase {
        owner_id: user.id,
        reminder_id: path_params.reminder_id.clone(),
        minutes: body.minutes,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(TaskpulseError::from)
}

/// Postpones the delivery of a `Reminder` for the given amount of minutes
#[derive(Debug)]
pub struct SnoozeReminderUseCase {
    pub owner_id: ID,
    pub reminder_id: ID,
    pub minutes: i64,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidMinutes(i64),
    StorageError,
}

impl From<UseCaseError> for TaskpulseError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => {
                Self::NotFound(format!("The reminder with id: {}, was not found.", id))
            }
            UseCaseError::InvalidMinutes(minutes) => Self::BadClientData(format!(
                "A reminder can only be snoozed for between 1 and {} minutes, got {}",
                MAX_OFFSET_MINUTES, minutes
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SnoozeReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "SnoozeReminder";

    async fn execute(&mut self, ctx: &TaskpulseContext) -> Result<Self::Response, Self::Error> {
        if !(1..=MAX_OFFSET_MINUTES).contains(&self.minutes) {
            return Err(UseCaseError::InvalidMinutes(self.minutes));
        }

        let mut reminder = find_owned_reminder(&self.reminder_id, &self.owner_id, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))?;

        reminder.snooze(self.minutes, ctx.sys.get_timestamp_millis());
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::setup_context;
    use taskpulse_domain::{ReminderKind, ReminderStatus};

    #[actix_web::main]
    #[test]
    async fn snoozes_reminder() {
        let (ctx, relay) = setup_context(60_000);
        let reminder = Reminder::new_user_created(
            &ID::new(),
            ReminderKind::Custom,
            "Stand up".into(),
            60_000,
            Default::default(),
            0,
        );
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let usecase = SnoozeReminderUseCase {
            owner_id: reminder.owner_id.clone(),
            reminder_id: reminder.id.clone(),
            minutes: 15,
        };
        let snoozed = execute(usecase, &ctx).await.unwrap();
        assert_eq!(snoozed.status, ReminderStatus::Snoozed);
        assert_eq!(snoozed.snooze_until, Some(60_000 + 15 * 60_000));
        assert_eq!(relay.event_names(), vec!["reminderUpdated"]);

        // Snoozed reminders are not due until the snooze has elapsed
        assert!(ctx.repos.reminders.find_due(60_000).await.unwrap().is_empty());
        assert_eq!(
            ctx.repos
                .reminders
                .find_due(60_000 + 15 * 60_000)
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[actix_web::main]
    #[test]
    async fn rejects_non_positive_minutes() {
        let (ctx, _) = setup_context(0);
        let usecase = SnoozeReminderUseCase {
            owner_id: ID::new(),
            reminder_id: ID::new(),
            minutes: 0,
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::InvalidMinutes(0))
        ));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_too_long_snooze() {
        let (ctx, relay) = setup_context(0);
        let reminder = Reminder::new_user_created(
            &ID::new(),
            ReminderKind::Custom,
            "Stand up".into(),
            60_000,
            Default::default(),
            0,
        );
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let minutes = i64::MAX / 1000;
        let usecase = SnoozeReminderUseCase {
            owner_id: reminder.owner_id.clone(),
            reminder_id: reminder.id.clone(),
            minutes,
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::InvalidMinutes(m)) if m == minutes
        ));
        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ReminderStatus::Pending);
        assert!(relay.event_names().is_empty());
    }
}
