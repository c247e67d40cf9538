use crate::dtos::UserPreferencesDTO;
use serde::{Deserialize, Serialize};
use taskpulse_domain::{DeliveryChannels, ReminderTimes, UserPreferences};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferencesResponse {
    pub preferences: UserPreferencesDTO,
}

impl UserPreferencesResponse {
    pub fn new(preferences: UserPreferences) -> Self {
        Self {
            preferences: UserPreferencesDTO::new(preferences),
        }
    }
}

pub mod get_preferences {
    use super::*;

    pub type APIResponse = UserPreferencesResponse;
}

pub mod update_preferences {
    use super::*;

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub default_delivery_channels: Option<DeliveryChannels>,
        #[serde(default)]
        pub default_reminder_times: Option<ReminderTimes>,
    }

    pub type APIResponse = UserPreferencesResponse;
}
