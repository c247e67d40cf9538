use crate::{
    error::TaskpulseError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use taskpulse_api_structs::get_preferences::*;
use taskpulse_domain::{UserPreferences, ID};
use taskpulse_infra::TaskpulseContext;

pub async fn get_preferences_controller(
    http_req: HttpRequest,
    ctx: web::Data<TaskpulseContext>,
) -> Result<HttpResponse, TaskpulseError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetPreferencesUseCase { user_id: user.id };
    execute(usecase, &ctx)
        .await
        .map(|preferences| HttpResponse::Ok().json(APIResponse::new(preferences)))
        .map_err(|_| TaskpulseError::InternalError)
}

/// The stored preferences of a `User` or the defaults when there are none
#[derive(Debug)]
pub struct GetPreferencesUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetPreferencesUseCase {
    type Response = UserPreferences;

    type Error = UseCaseError;

    const NAME: &'static str = "GetPreferences";

    async fn execute(&mut self, ctx: &TaskpulseContext) -> Result<Self::Response, Self::Error> {
        let preferences = ctx
            .repos
            .preferences
            .find(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        Ok(preferences.unwrap_or_else(|| UserPreferences::new(self.user_id.clone())))
    }
}
