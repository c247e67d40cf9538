use crate::dtos::TaskDTO;
use serde::{Deserialize, Serialize};
use taskpulse_domain::{Task, ID};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub task: TaskDTO,
}

impl TaskResponse {
    pub fn new(task: Task) -> Self {
        Self {
            task: TaskDTO::new(task),
        }
    }
}

pub mod create_task {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub owner_id: ID,
        pub title: String,
        #[serde(default)]
        pub due_date: Option<i64>,
    }

    pub type APIResponse = TaskResponse;
}

pub mod update_task {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub task_id: ID,
    }

    /// Replaces the fields of a `Task`, a different `owner_id` reassigns it
    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub owner_id: ID,
        pub title: String,
        #[serde(default)]
        pub due_date: Option<i64>,
    }

    pub type APIResponse = TaskResponse;
}

pub mod delete_task {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub task_id: ID,
    }

    pub type APIResponse = TaskResponse;
}
