use crate::{
    reminder::ReminderKind,
    shared::entity::{Entity, ID},
};
use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The kind of entity a system generated `Reminder` belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    Task,
    Goal,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Task => "Task",
            Self::Goal => "Goal",
        }
    }

    pub fn reminder_kind(&self) -> ReminderKind {
        match self {
            Self::Task => ReminderKind::TaskDue,
            Self::Goal => ReminderKind::GoalDeadline,
        }
    }
}

impl FromStr for TargetKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Task" => Ok(Self::Task),
            "Goal" => Ok(Self::Goal),
            _ => Err(anyhow::Error::msg(format!("Unknown target kind: {}", s))),
        }
    }
}

/// The part of a `Task` or `Goal` that decides its `Reminder`
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderTarget {
    pub id: ID,
    pub kind: TargetKind,
    pub title: String,
    /// Due date of a `Task` or end date of a `Goal` in millis
    pub deadline: Option<i64>,
}

impl ReminderTarget {
    pub fn reminder_message(&self) -> String {
        let deadline = self
            .deadline
            .and_then(|ts| Utc.timestamp_millis_opt(ts).single())
            .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string());
        match (self.kind, deadline) {
            (TargetKind::Task, Some(deadline)) => {
                format!("Task \"{}\" is due at {}", self.title, deadline)
            }
            (TargetKind::Goal, Some(deadline)) => {
                format!("Goal \"{}\" ends at {}", self.title, deadline)
            }
            (TargetKind::Task, None) => format!("Task \"{}\" is due", self.title),
            (TargetKind::Goal, None) => format!("Goal \"{}\" is ending", self.title),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: ID,
    /// The `User` the `Task` is assigned to
    pub owner_id: ID,
    pub title: String,
    pub due_date: Option<i64>,
    pub created: i64,
    pub updated: i64,
}

impl Task {
    pub fn new(owner_id: ID, title: String, due_date: Option<i64>, now: i64) -> Self {
        Self {
            id: Default::default(),
            owner_id,
            title,
            due_date,
            created: now,
            updated: now,
        }
    }

    pub fn as_reminder_target(&self) -> ReminderTarget {
        ReminderTarget {
            id: self.id.clone(),
            kind: TargetKind::Task,
            title: self.title.clone(),
            deadline: self.due_date,
        }
    }
}

impl Entity for Task {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    pub id: ID,
    pub owner_id: ID,
    pub title: String,
    pub end_date: Option<i64>,
    pub created: i64,
    pub updated: i64,
}

impl Goal {
    pub fn new(owner_id: ID, title: String, end_date: Option<i64>, now: i64) -> Self {
        Self {
            id: Default::default(),
            owner_id,
            title,
            end_date,
            created: now,
            updated: now,
        }
    }

    pub fn as_reminder_target(&self) -> ReminderTarget {
        ReminderTarget {
            id: self.id.clone(),
            kind: TargetKind::Goal,
            title: self.title.clone(),
            deadline: self.end_date,
        }
    }
}

impl Entity for Goal {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_creates_message_from_title_and_deadline() {
        // 2025-06-20T10:00:00Z
        let task = Task::new(ID::new(), "Ship release".into(), Some(1750413600000), 0);
        assert_eq!(
            task.as_reminder_target().reminder_message(),
            "Task \"Ship release\" is due at 2025-06-20 10:00 UTC"
        );

        let goal = Goal::new(ID::new(), "Learn Rust".into(), Some(1750413600000), 0);
        let target = goal.as_reminder_target();
        assert_eq!(target.kind.reminder_kind(), ReminderKind::GoalDeadline);
        assert_eq!(
            target.reminder_message(),
            "Goal \"Learn Rust\" ends at 2025-06-20 10:00 UTC"
        );
    }
}
