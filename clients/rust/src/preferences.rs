use crate::{APIResponse, BaseClient};
use reqwest::StatusCode;
use std::sync::Arc;
use taskpulse_api_structs::*;

#[derive(Clone)]
pub struct PreferencesClient {
    base: Arc<BaseClient>,
}

impl PreferencesClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get(&self) -> APIResponse<get_preferences::APIResponse> {
        self.base
            .get("me/preferences".into(), StatusCode::OK)
            .await
    }

    /// Only the given preferences are changed
    pub async fn update(
        &self,
        input: update_preferences::RequestBody,
    ) -> APIResponse<update_preferences::APIResponse> {
        self.base
            .put(input, "me/preferences".into(), StatusCode::OK)
            .await
    }
}
