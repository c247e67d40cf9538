use super::ITaskRepo;
use crate::repos::shared::inmemory_repo::*;
use taskpulse_domain::{Task, ID};

pub struct InMemoryTaskRepo {
    tasks: std::sync::Mutex<Vec<Task>>,
}

impl InMemoryTaskRepo {
    pub fn new() -> Self {
        Self {
            tasks: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl ITaskRepo for InMemoryTaskRepo {
    async fn insert(&self, task: &Task) -> anyhow::Result<()> {
        insert(task, &self.tasks)
    }

    async fn save(&self, task: &Task) -> anyhow::Result<()> {
        save(task, &self.tasks)
    }

    async fn find(&self, task_id: &ID) -> anyhow::Result<Option<Task>> {
        find(task_id, &self.tasks)
    }

    async fn delete(&self, task_id: &ID) -> anyhow::Result<Option<Task>> {
        delete(task_id, &self.tasks)
    }
}
