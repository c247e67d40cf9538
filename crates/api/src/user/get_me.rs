use crate::{error::TaskpulseError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use taskpulse_api_structs::UserResponse;
use taskpulse_infra::TaskpulseContext;

pub async fn get_me_controller(
    http_req: HttpRequest,
    ctx: web::Data<TaskpulseContext>,
) -> Result<HttpResponse, TaskpulseError> {
    let user = protect_route(&http_req, &ctx).await?;

    Ok(HttpResponse::Ok().json(UserResponse::new(user)))
}
