use crate::{APIResponse, BaseClient, ID};
use reqwest::StatusCode;
use std::sync::Arc;
use taskpulse_api_structs::*;

#[derive(Clone)]
pub struct GoalClient {
    base: Arc<BaseClient>,
}

pub struct CreateGoalInput {
    pub owner_id: ID,
    pub title: String,
    pub end_date: Option<i64>,
}

pub struct UpdateGoalInput {
    pub goal_id: ID,
    pub owner_id: ID,
    pub title: String,
    pub end_date: Option<i64>,
}

impl GoalClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(&self, input: CreateGoalInput) -> APIResponse<create_goal::APIResponse> {
        let body = create_goal::RequestBody {
            owner_id: input.owner_id,
            title: input.title,
            end_date: input.end_date,
        };

        self.base
            .post(body, "goals".into(), StatusCode::CREATED)
            .await
    }

    pub async fn update(&self, input: UpdateGoalInput) -> APIResponse<update_goal::APIResponse> {
        let body = update_goal::RequestBody {
            owner_id: input.owner_id,
            title: input.title,
            end_date: input.end_date,
        };

        self.base
            .put(body, format!("goals/{}", input.goal_id), StatusCode::OK)
            .await
    }

    pub async fn delete(&self, goal_id: ID) -> APIResponse<delete_goal::APIResponse> {
        self.base
            .delete(format!("goals/{}", goal_id), StatusCode::OK)
            .await
    }
}
