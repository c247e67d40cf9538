use serde::{Deserialize, Serialize};
use taskpulse_domain::ID;

/// Payload of `reminderDeleted`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeletedReminderDTO {
    pub id: ID,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<ID>,
}

/// Payload of `deleteTask` and `goalDeleted`, the id is the one of the target
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeletedTargetDTO {
    pub id: ID,
}
