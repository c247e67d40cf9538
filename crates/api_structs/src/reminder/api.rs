use crate::dtos::ReminderDTO;
use serde::{Deserialize, Serialize};
use taskpulse_domain::{DeliveryChannels, Reminder, ReminderKind, ID};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub reminder: ReminderDTO,
}

impl ReminderResponse {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            reminder: ReminderDTO::new(reminder),
        }
    }
}

pub mod get_reminders {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminders: Vec<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(reminders: Vec<Reminder>) -> Self {
            Self {
                reminders: reminders.into_iter().map(ReminderDTO::new).collect(),
            }
        }
    }
}

pub mod create_reminder {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub kind: Option<ReminderKind>,
        pub message: String,
        pub remind_at: i64,
        #[serde(default)]
        pub delivery_channels: Option<DeliveryChannels>,
        #[serde(default)]
        pub repeat_interval: Option<i64>,
        #[serde(default)]
        pub email_override: Option<String>,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod update_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    /// Replaces the user editable fields of a `Reminder`
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub message: String,
        pub remind_at: i64,
        pub delivery_channels: DeliveryChannels,
        #[serde(default)]
        pub repeat_interval: Option<i64>,
        #[serde(default)]
        pub email_override: Option<String>,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod delete_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod snooze_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub minutes: i64,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod dismiss_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = ReminderResponse;
}
