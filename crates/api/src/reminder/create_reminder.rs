use super::subscribers::RelayCreatedReminder;
use crate::{
    error::TaskpulseError,
    shared::{
        auth::protect_route,
        usecase::{execute, Subscriber, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use taskpulse_api_structs::create_reminder::*;
use taskpulse_domain::{
    validation::validate_reminder_fields, DeliveryChannels, Reminder, ReminderKind,
    ReminderValidationError, UserPreferences, ID,
};
use taskpulse_infra::TaskpulseContext;

pub async fn create_reminder_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<TaskpulseContext>,
) -> Result<HttpResponse, TaskpulseError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateReminderUseCase {
        owner_id: user.id,
        kind: body.kind.unwrap_or(ReminderKind::Custom),
        message: body.message,
        remind_at: body.remind_at,
        delivery_channels: body.delivery_channels,
        repeat_interval: body.repeat_interval,
        email_override: body.email_override,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Created().json(APIResponse::new(reminder)))
        .map_err(TaskpulseError::from)
}

/// Creates a `Reminder` on behalf of its owner
#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub owner_id: ID,
    pub kind: ReminderKind,
    pub message: String,
    pub remind_at: i64,
    /// Falls back to the default channels of the owner
    pub delivery_channels: Option<DeliveryChannels>,
    pub repeat_interval: Option<i64>,
    pub email_override: Option<String>,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidReminder(ReminderValidationError),
    NoDeliveryChannels,
    StorageError,
}

impl From<UseCaseError> for TaskpulseError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidReminder(e) => e.into(),
            UseCaseError::NoDeliveryChannels => {
                Self::BadClientData("At least one delivery channel must be selected".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &TaskpulseContext) -> Result<Self::Response, Self::Error> {
        validate_reminder_fields(
            &self.message,
            self.repeat_interval,
            self.email_override.as_deref(),
        )
        .map_err(UseCaseError::InvalidReminder)?;

        let delivery_channels = match self.delivery_channels {
            Some(channels) => channels,
            None => {
                ctx.repos
                    .preferences
                    .find(&self.owner_id)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?
                    .unwrap_or_else(|| UserPreferences::new(self.owner_id.clone()))
                    .default_delivery_channels
            }
        };
        if delivery_channels.is_empty() {
            return Err(UseCaseError::NoDeliveryChannels);
        }

        let mut reminder = Reminder::new_user_created(
            &self.owner_id,
            self.kind,
            self.message.trim().to_string(),
            self.remind_at,
            delivery_channels,
            ctx.sys.get_timestamp_millis(),
        );
        reminder.repeat_interval = self.repeat_interval;
        reminder.email_override = self.email_override.clone();

        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RelayCreatedReminder)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::setup_context;

    fn usecase(owner_id: &ID) -> CreateReminderUseCase {
        CreateReminderUseCase {
            owner_id: owner_id.clone(),
            kind: ReminderKind::Meeting,
            message: "1:1 with Kari".into(),
            remind_at: 5000,
            delivery_channels: None,
            repeat_interval: Some(30),
            email_override: None,
        }
    }

    #[actix_web::main]
    #[test]
    async fn creates_user_reminder_with_default_channels() {
        let (ctx, relay) = setup_context(1000);
        let owner_id = ID::new();

        let reminder = execute(usecase(&owner_id), &ctx).await.unwrap();
        assert!(reminder.is_user_created);
        assert_eq!(reminder.target_id, None);
        assert_eq!(reminder.repeat_interval, Some(30));
        assert_eq!(reminder.delivery_channels, DeliveryChannels::default());
        assert_eq!(
            ctx.repos.reminders.find_by_owner(&owner_id).await.unwrap(),
            vec![reminder]
        );
        assert_eq!(relay.event_names(), vec!["newReminder"]);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_invalid_reminders() {
        let (ctx, relay) = setup_context(1000);
        let owner_id = ID::new();

        let mut invalid = usecase(&owner_id);
        invalid.message = "  ".into();
        assert!(matches!(
            execute(invalid, &ctx).await,
            Err(UseCaseError::InvalidReminder(ReminderValidationError::MissingMessage))
        ));

        let mut invalid = usecase(&owner_id);
        invalid.repeat_interval = Some(4);
        assert!(execute(invalid, &ctx).await.is_err());

        let mut invalid = usecase(&owner_id);
        invalid.email_override = Some("not-an-email".into());
        assert!(execute(invalid, &ctx).await.is_err());

        let mut invalid = usecase(&owner_id);
        invalid.delivery_channels = Some(DeliveryChannels {
            in_app: false,
            email: false,
            push: false,
        });
        assert!(matches!(
            execute(invalid, &ctx).await,
            Err(UseCaseError::NoDeliveryChannels)
        ));

        assert!(ctx.repos.reminders.find_by_owner(&owner_id).await.unwrap().is_empty());
        assert!(relay.event_names().is_empty());
    }
}
