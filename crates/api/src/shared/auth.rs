use crate::error::TaskpulseError;
use actix_web::HttpRequest;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use taskpulse_domain::{User, ID};
use taskpulse_infra::{TaskpulseContext, RELAY_SECRET_HEADER};

/// How long issued session tokens are valid
const SESSION_TOKEN_TTL_SECS: i64 = 60 * 60 * 24 * 30;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Claims {
    exp: usize,      // Expiration time (as UTC timestamp)
    iat: usize,      // Issued at (as UTC timestamp)
    user_id: String, // Subject (whom token refers to)
}

fn parse_authtoken_header(token_header_value: &str) -> String {
    token_header_value
        .replace("Bearer", "")
        .replace("bearer", "")
        .trim()
        .to_string()
}

/// Creates a session token for the given `User`
pub fn issue_session_token(user_id: &ID, ctx: &TaskpulseContext) -> anyhow::Result<String> {
    let now_secs = ctx.sys.get_timestamp_millis() / 1000;
    let claims = Claims {
        exp: (now_secs + SESSION_TOKEN_TTL_SECS) as usize,
        iat: now_secs as usize,
        user_id: user_id.to_string(),
    };
    let enc_key = EncodingKey::from_secret(ctx.config.session_secret.as_bytes());
    let token = encode(&Header::new(Algorithm::HS256), &claims, &enc_key)?;
    Ok(token)
}

fn decode_token(token: &str, ctx: &TaskpulseContext) -> anyhow::Result<ID> {
    let decoding_key = DecodingKey::from_secret(ctx.config.session_secret.as_bytes());
    let claims = decode::<Claims>(token, &decoding_key, &Validation::new(Algorithm::HS256))?.claims;
    let user_id = claims.user_id.parse::<ID>()?;
    Ok(user_id)
}

async fn find_token_user(token: &str, ctx: &TaskpulseContext) -> Result<User, TaskpulseError> {
    let user_id = decode_token(token, ctx).map_err(|_| {
        TaskpulseError::Unauthorized("Invalid or expired session token".to_string())
    })?;
    match ctx.repos.users.find(&user_id).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(TaskpulseError::Unauthorized(
            "Unable to find user from credentials".to_string(),
        )),
        Err(_) => Err(TaskpulseError::InternalError),
    }
}

/// Authenticates the `User` of a session route from the `Authorization` header
pub async fn protect_route(
    req: &HttpRequest,
    ctx: &TaskpulseContext,
) -> Result<User, TaskpulseError> {
    let token = match req.headers().get("authorization") {
        Some(token) => match token.to_str() {
            Ok(token) => parse_authtoken_header(token),
            Err(_) => {
                return Err(TaskpulseError::Unauthorized(
                    "Malformed authorization header provided".to_string(),
                ))
            }
        },
        None => {
            return Err(TaskpulseError::Unauthorized(
                "Unable to find session token in authorization header".to_string(),
            ))
        }
    };
    find_token_user(&token, ctx).await
}

/// Authenticates the `User` of a realtime connection, browsers are not
/// able to set headers on websocket requests so the token is a query parameter
pub async fn protect_realtime_route(
    token: &str,
    ctx: &TaskpulseContext,
) -> Result<User, TaskpulseError> {
    find_token_user(token, ctx).await
}

fn header_value<'a>(req: &'a HttpRequest, name: &str) -> Result<&'a str, TaskpulseError> {
    match req.headers().get(name) {
        Some(value) => value.to_str().map_err(|_| {
            TaskpulseError::Unauthorized(format!("Malformed {} header provided", name))
        }),
        None => Err(TaskpulseError::Unauthorized(format!(
            "Unable to find {} header",
            name
        ))),
    }
}

/// Protects the operator facing routes with the admin api key
pub fn protect_admin_route(
    req: &HttpRequest,
    ctx: &TaskpulseContext,
) -> Result<(), TaskpulseError> {
    let api_key = header_value(req, "x-api-key")?;
    if api_key != ctx.config.admin_api_key {
        return Err(TaskpulseError::Unauthorized(
            "Invalid api-key provided in x-api-key header".to_string(),
        ));
    }
    Ok(())
}

/// Protects the inbound relay route with the shared relay secret
pub fn protect_relay_route(
    req: &HttpRequest,
    ctx: &TaskpulseContext,
) -> Result<(), TaskpulseError> {
    let secret = header_value(req, RELAY_SECRET_HEADER)?;
    if secret != ctx.config.relay.secret {
        return Err(TaskpulseError::Unauthorized(format!(
            "Invalid secret provided in {} header",
            RELAY_SECRET_HEADER
        )));
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::test::TestRequest;

    async fn setup_user(ctx: &TaskpulseContext) -> User {
        let user = User::new("kari@example.com".into(), 0);
        ctx.repos.users.insert(&user).await.unwrap();
        user
    }

    fn get_token(user_id: &ID, secret: &str, expired: bool) -> String {
        let exp = if expired {
            100 // year 1970
        } else {
            5609418990073 // year 2147
        };
        let claims = Claims {
            exp,
            iat: 19,
            user_id: user_id.to_string(),
        };
        let enc_key = EncodingKey::from_secret(secret.as_bytes());
        encode(&Header::new(Algorithm::HS256), &claims, &enc_key).unwrap()
    }

    #[actix_web::main]
    #[test]
    async fn decodes_valid_token() {
        let ctx = TaskpulseContext::create_inmemory();
        let user = setup_user(&ctx).await;
        let token = get_token(&user.id, &ctx.config.session_secret, false);

        let req = TestRequest::default()
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_http_request();
        let res = protect_route(&req, &ctx).await;
        assert_eq!(res.unwrap().id, user.id);
    }

    #[actix_web::main]
    #[test]
    async fn decodes_issued_token() {
        let ctx = TaskpulseContext::create_inmemory();
        let user = setup_user(&ctx).await;
        let token = issue_session_token(&user.id, &ctx).unwrap();

        let res = protect_realtime_route(&token, &ctx).await;
        assert_eq!(res.unwrap().id, user.id);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_expired_token() {
        let ctx = TaskpulseContext::create_inmemory();
        let user = setup_user(&ctx).await;
        let token = get_token(&user.id, &ctx.config.session_secret, true);

        let req = TestRequest::default()
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_http_request();
        assert!(protect_route(&req, &ctx).await.is_err());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_token_with_other_secret() {
        let ctx = TaskpulseContext::create_inmemory();
        let user = setup_user(&ctx).await;
        let token = get_token(&user.id, "not-the-secret", false);
        assert!(protect_realtime_route(&token, &ctx).await.is_err());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_token_of_unknown_user() {
        let ctx = TaskpulseContext::create_inmemory();
        let token = get_token(&ID::new(), &ctx.config.session_secret, false);
        assert!(protect_realtime_route(&token, &ctx).await.is_err());
    }

    #[test]
    fn checks_admin_api_key() {
        let ctx = TaskpulseContext::create_inmemory();
        let req = TestRequest::default()
            .insert_header(("x-api-key", ctx.config.admin_api_key.clone()))
            .to_http_request();
        assert!(protect_admin_route(&req, &ctx).is_ok());

        let req = TestRequest::default()
            .insert_header(("x-api-key", "wrong"))
            .to_http_request();
        assert!(protect_admin_route(&req, &ctx).is_err());
        assert!(protect_admin_route(&TestRequest::default().to_http_request(), &ctx).is_err());
    }

    #[test]
    fn checks_relay_secret() {
        let ctx = TaskpulseContext::create_inmemory();
        let req = TestRequest::default()
            .insert_header((RELAY_SECRET_HEADER, ctx.config.relay.secret.clone()))
            .to_http_request();
        assert!(protect_relay_route(&req, &ctx).is_ok());

        let req = TestRequest::default()
            .insert_header((RELAY_SECRET_HEADER, "wrong"))
            .to_http_request();
        assert!(protect_relay_route(&req, &ctx).is_err());
    }
}
