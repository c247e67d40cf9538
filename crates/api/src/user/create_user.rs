use crate::shared::usecase::{execute, UseCase};
use crate::{
    error::TaskpulseError,
    shared::auth::{issue_session_token, protect_admin_route},
};
use actix_web::{web, HttpRequest, HttpResponse};
use taskpulse_api_structs::create_user::*;
use taskpulse_domain::{validation::validate_email, User};
use taskpulse_infra::TaskpulseContext;

pub async fn create_user_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<TaskpulseContext>,
) -> Result<HttpResponse, TaskpulseError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = CreateUserUseCase {
        email: body.0.email,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Created().json(APIResponse::new(res.user, res.session_token)))
        .map_err(TaskpulseError::from)
}

#[derive(Debug)]
pub struct CreateUserUseCase {
    pub email: String,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub user: User,
    pub session_token: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidEmail(String),
    StorageError,
}

impl From<UseCaseError> for TaskpulseError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidEmail(email) => {
                Self::BadClientData(format!("The given email: {}, is not valid.", email))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateUserUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateUser";

    async fn execute(&mut self, ctx: &TaskpulseContext) -> Result<Self::Response, Self::Error> {
        let email = self.email.trim().to_string();
        if validate_email(&email).is_err() {
            return Err(UseCaseError::InvalidEmail(email));
        }

        let user = User::new(email, ctx.sys.get_timestamp_millis());
        ctx.repos
            .users
            .insert(&user)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let session_token =
            issue_session_token(&user.id, ctx).map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes {
            user,
            session_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{auth::protect_realtime_route, test_utils::setup_context};

    #[actix_web::main]
    #[test]
    async fn issues_a_usable_session_token() {
        let (ctx, _) = setup_context(1750000000000);
        let usecase = CreateUserUseCase {
            email: " kari@example.com ".into(),
        };
        let res = execute(usecase, &ctx).await.unwrap();
        assert_eq!(res.user.email, "kari@example.com");

        let user = protect_realtime_route(&res.session_token, &ctx).await.unwrap();
        assert_eq!(user.id, res.user.id);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_invalid_email() {
        let (ctx, _) = setup_context(0);
        let usecase = CreateUserUseCase {
            email: "kari".into(),
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::InvalidEmail(_))
        ));
    }
}
