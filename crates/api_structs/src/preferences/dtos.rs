use serde::{Deserialize, Serialize};
use taskpulse_domain::{DeliveryChannels, ReminderTimes, UserPreferences, ID};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferencesDTO {
    pub user_id: ID,
    pub default_delivery_channels: DeliveryChannels,
    pub default_reminder_times: ReminderTimes,
}

impl UserPreferencesDTO {
    pub fn new(preferences: UserPreferences) -> Self {
        Self {
            user_id: preferences.user_id,
            default_delivery_channels: preferences.default_delivery_channels,
            default_reminder_times: preferences.default_reminder_times,
        }
    }
}
