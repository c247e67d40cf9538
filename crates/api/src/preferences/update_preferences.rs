use super::get_preferences::GetPreferencesUseCase;
use crate::{
    error::TaskpulseError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use taskpulse_api_structs::update_preferences::*;
use taskpulse_domain::{
    validation::MAX_OFFSET_MINUTES, DeliveryChannels, ReminderTimes, UserPreferences, ID,
};
use taskpulse_infra::TaskpulseContext;

pub async fn update_preferences_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<TaskpulseContext>,
) -> Result<HttpResponse, TaskpulseError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = UpdatePreferencesUseCase {
        user_id: user.id,
        default_delivery_channels: body.default_delivery_channels,
        default_reminder_times: body.default_reminder_times,
    };
    execute(usecase, &ctx)
        .await
        .map(|preferences| HttpResponse::Ok().json(APIResponse::new(preferences)))
        .map_err(TaskpulseError::from)
}

/// Changes the defaults used for new and synced reminders of a `User`.
/// Existing reminders pick up the change the next time they are synced.
#[derive(Debug)]
pub struct UpdatePreferencesUseCase {
    pub user_id: ID,
    pub default_delivery_channels: Option<DeliveryChannels>,
    pub default_reminder_times: Option<ReminderTimes>,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidReminderTimes,
    StorageError,
}

impl From<UseCaseError> for TaskpulseError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidReminderTimes => {
                Self::BadClientData(format!(
                    "Reminder lead times must be between 0 and {} minutes",
                    MAX_OFFSET_MINUTES
                ))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdatePreferencesUseCase {
    type Response = UserPreferences;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdatePreferences";

    async fn execute(&mut self, ctx: &TaskpulseContext) -> Result<Self::Response, Self::Error> {
        let get_preferences = GetPreferencesUseCase {
            user_id: self.user_id.clone(),
        };
        let mut preferences = execute(get_preferences, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        if let Some(channels) = self.default_delivery_channels {
            preferences.default_delivery_channels = channels;
        }
        if let Some(times) = &self.default_reminder_times {
            if !times.is_valid() {
                return Err(UseCaseError::InvalidReminderTimes);
            }
            preferences.default_reminder_times = times.clone();
        }

        ctx.repos
            .preferences
            .save(&preferences)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(preferences)
    }
}
