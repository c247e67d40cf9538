use serde::{Deserialize, Serialize};
use taskpulse_domain::{User, ID};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserDTO {
    pub id: ID,
    pub email: String,
    pub push_token: Option<String>,
}

impl UserDTO {
    pub fn new(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            push_token: user.push_token,
        }
    }
}
