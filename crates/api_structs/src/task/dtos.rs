use serde::{Deserialize, Serialize};
use taskpulse_domain::{Task, ID};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskDTO {
    pub id: ID,
    pub owner_id: ID,
    pub title: String,
    pub due_date: Option<i64>,
    pub created: i64,
    pub updated: i64,
}

impl TaskDTO {
    pub fn new(task: Task) -> Self {
        Self {
            id: task.id,
            owner_id: task.owner_id,
            title: task.title,
            due_date: task.due_date,
            created: task.created,
            updated: task.updated,
        }
    }
}
