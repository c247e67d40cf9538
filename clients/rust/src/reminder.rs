use crate::{APIResponse, BaseClient, DeliveryChannels, ReminderKind, ID};
use reqwest::StatusCode;
use std::sync::Arc;
use taskpulse_api_structs::*;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

#[derive(Debug, Clone)]
pub struct CreateReminderInput {
    pub kind: Option<ReminderKind>,
    pub message: String,
    pub remind_at: i64,
    /// Falls back to the default delivery channels of the `User`
    pub delivery_channels: Option<DeliveryChannels>,
    pub repeat_interval: Option<i64>,
    pub email_override: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateReminderInput {
    pub reminder_id: ID,
    pub message: String,
    pub remind_at: i64,
    pub delivery_channels: DeliveryChannels,
    pub repeat_interval: Option<i64>,
    pub email_override: Option<String>,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn list(&self) -> APIResponse<get_reminders::APIResponse> {
        self.base.get("me/reminders".into(), StatusCode::OK).await
    }

    pub async fn create(
        &self,
        input: CreateReminderInput,
    ) -> APIResponse<create_reminder::APIResponse> {
        let body = create_reminder::RequestBody {
            kind: input.kind,
            message: input.message,
            remind_at: input.remind_at,
            delivery_channels: input.delivery_channels,
            repeat_interval: input.repeat_interval,
            email_override: input.email_override,
        };

        self.base
            .post(body, "me/reminders".into(), StatusCode::CREATED)
            .await
    }

    pub async fn update(
        &self,
        input: UpdateReminderInput,
    ) -> APIResponse<update_reminder::APIResponse> {
        let body = update_reminder::RequestBody {
            message: input.message,
            remind_at: input.remind_at,
            delivery_channels: input.delivery_channels,
            repeat_interval: input.repeat_interval,
            email_override: input.email_override,
        };

        self.base
            .put(
                body,
                format!("me/reminders/{}", input.reminder_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn delete(&self, reminder_id: ID) -> APIResponse<delete_reminder::APIResponse> {
        self.base
            .delete(format!("me/reminders/{}", reminder_id), StatusCode::OK)
            .await
    }

    pub async fn snooze(
        &self,
        reminder_id: ID,
        minutes: i64,
    ) -> APIResponse<snooze_reminder::APIResponse> {
        let body = snooze_reminder::RequestBody { minutes };

        self.base
            .post(
                body,
                format!("me/reminders/{}/snooze", reminder_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn dismiss(&self, reminder_id: ID) -> APIResponse<dismiss_reminder::APIResponse> {
        self.base
            .post(
                serde_json::json!({}),
                format!("me/reminders/{}/dismiss", reminder_id),
                StatusCode::OK,
            )
            .await
    }
}
