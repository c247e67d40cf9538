mod inmemory;
mod postgres;

pub use inmemory::InMemoryUserRepo;
pub use postgres::PostgresUserRepo;
use taskpulse_domain::{User, ID};

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn save(&self, user: &User) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<User>>;
    async fn find_many(&self, user_ids: &[ID]) -> anyhow::Result<Vec<User>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_push_token() {
        let repo = InMemoryUserRepo::new();
        let mut user = User::new("kari@example.com".into(), 0);
        let other = User::new("ola@example.com".into(), 0);
        repo.insert(&user).await.expect("To insert user");
        repo.insert(&other).await.expect("To insert user");

        user.push_token = Some("device-token".into());
        repo.save(&user).await.expect("To save user");

        let stored = repo.find(&user.id).await.unwrap().unwrap();
        assert_eq!(stored.push_token, Some("device-token".into()));

        let many = repo
            .find_many(&[user.id.clone(), ID::new()])
            .await
            .unwrap();
        assert_eq!(many.len(), 1);
    }
}
