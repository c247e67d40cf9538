mod inmemory;
mod postgres;

pub use inmemory::InMemoryTaskRepo;
pub use postgres::PostgresTaskRepo;
use taskpulse_domain::{Task, ID};

#[async_trait::async_trait]
pub trait ITaskRepo: Send + Sync {
    async fn insert(&self, task: &Task) -> anyhow::Result<()>;
    async fn save(&self, task: &Task) -> anyhow::Result<()>;
    async fn find(&self, task_id: &ID) -> anyhow::Result<Option<Task>>;
    async fn delete(&self, task_id: &ID) -> anyhow::Result<Option<Task>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn crud() {
        let repo = InMemoryTaskRepo::new();
        let mut task = Task::new(ID::new(), "Write report".into(), Some(1000), 0);
        repo.insert(&task).await.expect("To insert task");

        task.due_date = None;
        repo.save(&task).await.expect("To save task");
        assert_eq!(repo.find(&task.id).await.unwrap().unwrap().due_date, None);

        assert_eq!(repo.delete(&task.id).await.unwrap(), Some(task.clone()));
        assert!(repo.find(&task.id).await.unwrap().is_none());
        assert!(repo.delete(&task.id).await.unwrap().is_none());
    }
}
