use crate::shared::entity::{Entity, ID};

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    /// Account email, used for email reminders without an `email_override`
    pub email: String,
    /// Token handed over by the client for push notifications
    pub push_token: Option<String>,
    pub created: i64,
}

impl User {
    pub fn new(email: String, now: i64) -> Self {
        Self {
            id: Default::default(),
            email,
            push_token: None,
            created: now,
        }
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}
