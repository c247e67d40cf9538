mod inmemory;
mod postgres;

pub use inmemory::InMemoryGoalRepo;
pub use postgres::PostgresGoalRepo;
use taskpulse_domain::{Goal, ID};

#[async_trait::async_trait]
pub trait IGoalRepo: Send + Sync {
    async fn insert(&self, goal: &Goal) -> anyhow::Result<()>;
    async fn save(&self, goal: &Goal) -> anyhow::Result<()>;
    async fn find(&self, goal_id: &ID) -> anyhow::Result<Option<Goal>>;
    async fn delete(&self, goal_id: &ID) -> anyhow::Result<Option<Goal>>;
}
