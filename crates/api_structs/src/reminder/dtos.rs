use serde::{Deserialize, Serialize};
use taskpulse_domain::{
    DeliveryChannels, Reminder, ReminderKind, ReminderStatus, TargetKind, ID,
};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub owner_id: ID,
    pub kind: ReminderKind,
    pub target_id: Option<ID>,
    pub target_kind: Option<TargetKind>,
    pub message: String,
    pub remind_at: i64,
    pub delivery_channels: DeliveryChannels,
    pub status: ReminderStatus,
    pub snooze_until: Option<i64>,
    pub repeat_interval: Option<i64>,
    pub email_override: Option<String>,
    pub created_by: ID,
    pub is_user_created: bool,
    pub delivered: bool,
    pub created: i64,
    pub updated: i64,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            owner_id: reminder.owner_id,
            kind: reminder.kind,
            target_id: reminder.target_id,
            target_kind: reminder.target_kind,
            message: reminder.message,
            remind_at: reminder.remind_at,
            delivery_channels: reminder.delivery_channels,
            status: reminder.status,
            snooze_until: reminder.snooze_until,
            repeat_interval: reminder.repeat_interval,
            email_override: reminder.email_override,
            created_by: reminder.created_by,
            is_user_created: reminder.is_user_created,
            delivered: reminder.delivered,
            created: reminder.created,
            updated: reminder.updated,
        }
    }
}
