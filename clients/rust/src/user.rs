use crate::{APIResponse, BaseClient};
use reqwest::StatusCode;
use std::sync::Arc;
use taskpulse_api_structs::*;

#[derive(Clone)]
pub struct UserClient {
    base: Arc<BaseClient>,
}

impl UserClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Creates a `User` and returns it with a session token. Requires the admin api key.
    pub async fn create(&self, email: String) -> APIResponse<create_user::APIResponse> {
        let body = create_user::RequestBody { email };

        self.base
            .post(body, "user".into(), StatusCode::CREATED)
            .await
    }

    pub async fn me(&self) -> APIResponse<UserResponse> {
        self.base.get("me".into(), StatusCode::OK).await
    }

    /// Sets the push token of the session `User`, `None` removes it
    pub async fn set_push_token(
        &self,
        push_token: Option<String>,
    ) -> APIResponse<set_push_token::APIResponse> {
        let body = set_push_token::RequestBody { push_token };

        self.base
            .put(body, "me/push-token".into(), StatusCode::OK)
            .await
    }
}
