use super::IGoalRepo;
use crate::repos::shared::inmemory_repo::*;
use taskpulse_domain::{Goal, ID};

pub struct InMemoryGoalRepo {
    goals: std::sync::Mutex<Vec<Goal>>,
}

impl InMemoryGoalRepo {
    pub fn new() -> Self {
        Self {
            goals: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IGoalRepo for InMemoryGoalRepo {
    async fn insert(&self, goal: &Goal) -> anyhow::Result<()> {
        insert(goal, &self.goals)
    }

    async fn save(&self, goal: &Goal) -> anyhow::Result<()> {
        save(goal, &self.goals)
    }

    async fn find(&self, goal_id: &ID) -> anyhow::Result<Option<Goal>> {
        find(goal_id, &self.goals)
    }

    async fn delete(&self, goal_id: &ID) -> anyhow::Result<Option<Goal>> {
        delete(goal_id, &self.goals)
    }
}
