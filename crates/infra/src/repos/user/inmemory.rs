use super::IUserRepo;
use crate::repos::shared::inmemory_repo::*;
use taskpulse_domain::{User, ID};

pub struct InMemoryUserRepo {
    users: std::sync::Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for InMemoryUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        insert(user, &self.users)
    }

    async fn save(&self, user: &User) -> anyhow::Result<()> {
        save(user, &self.users)
    }

    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<User>> {
        find(user_id, &self.users)
    }

    async fn find_many(&self, user_ids: &[ID]) -> anyhow::Result<Vec<User>> {
        find_by(&self.users, |u| user_ids.contains(&u.id))
    }
}
