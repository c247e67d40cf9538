use crate::dtos::GoalDTO;
use serde::{Deserialize, Serialize};
use taskpulse_domain::{Goal, ID};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalResponse {
    pub goal: GoalDTO,
}

impl GoalResponse {
    pub fn new(goal: Goal) -> Self {
        Self {
            goal: GoalDTO::new(goal),
        }
    }
}

pub mod create_goal {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub owner_id: ID,
        pub title: String,
        #[serde(default)]
        pub end_date: Option<i64>,
    }

    pub type APIResponse = GoalResponse;
}

pub mod update_goal {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub goal_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub owner_id: ID,
        pub title: String,
        #[serde(default)]
        pub end_date: Option<i64>,
    }

    pub type APIResponse = GoalResponse;
}

pub mod delete_goal {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub goal_id: ID,
    }

    pub type APIResponse = GoalResponse;
}
