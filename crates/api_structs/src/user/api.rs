use crate::dtos::UserDTO;
use serde::{Deserialize, Serialize};
use taskpulse_domain::User;

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user: UserDTO,
}

impl UserResponse {
    pub fn new(user: User) -> Self {
        Self {
            user: UserDTO::new(user),
        }
    }
}

pub mod create_user {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub email: String,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub user: UserDTO,
        /// Session token the `User` can use against the session routes
        pub session_token: String,
    }

    impl APIResponse {
        pub fn new(user: User, session_token: String) -> Self {
            Self {
                user: UserDTO::new(user),
                session_token,
            }
        }
    }
}

pub mod set_push_token {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub push_token: Option<String>,
    }

    pub type APIResponse = UserResponse;
}
