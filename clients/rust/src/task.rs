use crate::{APIResponse, BaseClient, ID};
use reqwest::StatusCode;
use std::sync::Arc;
use taskpulse_api_structs::*;

#[derive(Clone)]
pub struct TaskClient {
    base: Arc<BaseClient>,
}

pub struct CreateTaskInput {
    pub owner_id: ID,
    pub title: String,
    pub due_date: Option<i64>,
}

pub struct UpdateTaskInput {
    pub task_id: ID,
    pub owner_id: ID,
    pub title: String,
    pub due_date: Option<i64>,
}

impl TaskClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(&self, input: CreateTaskInput) -> APIResponse<create_task::APIResponse> {
        let body = create_task::RequestBody {
            owner_id: input.owner_id,
            title: input.title,
            due_date: input.due_date,
        };

        self.base
            .post(body, "tasks".into(), StatusCode::CREATED)
            .await
    }

    pub async fn update(&self, input: UpdateTaskInput) -> APIResponse<update_task::APIResponse> {
        let body = update_task::RequestBody {
            owner_id: input.owner_id,
            title: input.title,
            due_date: input.due_date,
        };

        self.base
            .put(body, format!("tasks/{}", input.task_id), StatusCode::OK)
            .await
    }

    pub async fn delete(&self, task_id: ID) -> APIResponse<delete_task::APIResponse> {
        self.base
            .delete(format!("tasks/{}", task_id), StatusCode::OK)
            .await
    }
}
