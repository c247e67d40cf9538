use super::{find_owned_reminder, subscribers::RelayUpdatedReminder};
use crate::{
    error::TaskpulseError,
    shared::{
        auth::protect_route,
        usecase::{execute, Subscriber, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use taskpulse_api_structs::update_reminder::*;
use taskpulse_domain::{
    validation::validate_message, DeliveryChannels, Reminder, ReminderValidationError, ID,
};
use taskpulse_infra::TaskpulseContext;

pub async fn update_reminder_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    path_params: web::Path<PathParams>,
    ctx: web::Data<TaskpulseContext>,
) -> Result<HttpResponse, TaskpulseError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = UpdateReminderUseCase {
        owner_id: user.id,
        reminder_id: path_params.reminder_id.clone(),
        message: body.message,
        remind_at: body.remind_at,
        delivery_channels: body.delivery_channels,
        repeat_interval: body.repeat_interval,
        email_override: body.email_override,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(TaskpulseError::from)
}

#[derive(Debug)]
pub struct UpdateReminderUseCase {
    pub owner_id: ID,
    pub reminder_id: ID,
    pub message: String,
    pub remind_at: i64,
    pub delivery_channels: DeliveryChannels,
    pub repeat_interval: Option<i64>,
    pub email_override: Option<String>,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidReminder(ReminderValidationError),
    NoDeliveryChannels,
    StorageError,
}

impl From<UseCaseError> for TaskpulseError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => {
                Self::NotFound(format!("The reminder with id: {}, was not found.", id))
            }
            UseCaseError::InvalidReminder(e) => e.into(),
            UseCaseError::NoDeliveryChannels => {
                Self::BadClientData("At least one delivery channel must be selected".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateReminder";

    async fn execute(&mut self, ctx: &TaskpulseContext) -> Result<Self::Response, Self::Error> {
        validate_message(&self.message).map_err(UseCaseError::InvalidReminder)?;
        if self.delivery_channels.is_empty() {
            return Err(UseCaseError::NoDeliveryChannels);
        }

        let mut reminder = find_owned_reminder(&self.reminder_id, &self.owner_id, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))?;

        reminder
            .set_repeat_interval(self.repeat_interval)
            .map_err(UseCaseError::InvalidReminder)?;
        reminder
            .set_email_override(self.email_override.clone())
            .map_err(UseCaseError::InvalidReminder)?;
        if reminder.remind_at != self.remind_at {
            reminder.remind_at = self.remind_at;
            reminder.delivered = false;
        }
        reminder.message = self.message.trim().to_string();
        reminder.delivery_channels = self.delivery_channels;
        reminder.updated = ctx.sys.get_timestamp_millis();

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
    use taskpulse_domain::ReminderKind;

    async fn setup_reminder(ctx: &TaskpulseContext) -> Reminder {
        let mut reminder = Reminder::new_user_created(
            &ID::new(),
            ReminderKind::Custom,
            "Water plants".into(),
            1000,
            Default::default(),
            0,
        );
        reminder.delivered = true;
        ctx.repos.reminders.insert(&reminder).await.unwrap();
        reminder
    }

    fn usecase(reminder: &Reminder) -> UpdateReminderUseCase {
        UpdateReminderUseCase {
            owner_id: reminder.owner_id.clone(),
            reminder_id: reminder.id.clone(),
            message: "Water all plants".into(),
            remind_at: 2000,
            delivery_channels: DeliveryChannels {
                in_app: true,
                email: false,
                push: true,
            },
            repeat_interval: Some(1440),
            email_override: Some("home@example.com".into()),
        }
    }

    #[actix_web::main]
    #[test]
    async fn updates_reminder_of_owner() {
        let (ctx, relay) = setup_context(10);
        let reminder = setup_reminder(&ctx).await;

        let updated = execute(usecase(&reminder), &ctx).await.unwrap();
        assert_eq!(updated.id, reminder.id);
        assert_eq!(updated.message, "Water all plants");
        assert_eq!(updated.remind_at, 2000);
        assert!(!updated.delivered);
        assert_eq!(updated.repeat_interval, Some(1440));
        assert_eq!(updated.email_override, Some("home@example.com".into()));
        assert_eq!(
            ctx.repos.reminders.find(&reminder.id).await.unwrap(),
            Some(updated)
        );
        assert_eq!(relay.event_names(), vec!["reminderUpdated"]);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_update_from_other_user() {
        let (ctx, _) = setup_context(10);
        let reminder = setup_reminder(&ctx).await;

        let mut usecase = usecase(&reminder);
        usecase.owner_id = ID::new();
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::NotFound(_))
        ));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_invalid_repeat_interval() {
        let (ctx, _) = setup_context(10);
        let reminder = setup_reminder(&ctx).await;

        let mut usecase = usecase(&reminder);
        usecase.repeat_interval = Some(1441);
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::InvalidReminder(
                ReminderValidationError::InvalidRepeatInterval(1441)
            ))
        ));
        assert_eq!(
            ctx.repos.reminders.find(&reminder.id).await.unwrap(),
            Some(reminder)
        );
    }
}
