use serde::{Deserialize, Serialize};
use taskpulse_domain::{Goal, ID};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalDTO {
    pub id: ID,
    pub owner_id: ID,
    pub title: String,
    pub end_date: Option<i64>,
    pub created: i64,
    pub updated: i64,
}

impl GoalDTO {
    pub fn new(goal: Goal) -> Self {
        Self {
            id: goal.id,
            owner_id: goal.owner_id,
            title: goal.title,
            end_date: goal.end_date,
            created: goal.created,
            updated: goal.updated,
        }
    }
}
