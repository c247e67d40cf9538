use serde::{Deserialize, Serialize};
use taskpulse_domain::ID;

pub mod relay_event {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub user_id: ID,
        pub event: String,
        pub data: serde_json::Value,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        /// Number of open realtime connections the event was pushed to
        pub receivers: usize,
    }
}
