use crate::dtos::{DeletedReminderDTO, DeletedTargetDTO, GoalDTO, ReminderDTO, TaskDTO};
use serde::{Deserialize, Serialize};

/// Events pushed to the realtime connections of a `User`.
///
/// On the wire an event is `{"event": "<name>", "data": <payload>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum RealtimeEvent {
    #[serde(rename = "newReminder")]
    NewReminder(ReminderDTO),
    #[serde(rename = "reminderUpdated")]
    ReminderUpdated(ReminderDTO),
    #[serde(rename = "reminderDeleted")]
    ReminderDeleted(DeletedReminderDTO),
    /// A `Reminder` was delivered in app
    #[serde(rename = "reminderTriggered")]
    ReminderTriggered(ReminderDTO),
    #[serde(rename = "newTask")]
    NewTask(TaskDTO),
    #[serde(rename = "updateTask")]
    UpdateTask(TaskDTO),
    #[serde(rename = "deleteTask")]
    DeleteTask(DeletedTargetDTO),
    #[serde(rename = "newGoal")]
    NewGoal(GoalDTO),
    #[serde(rename = "goalUpdated")]
    GoalUpdated(GoalDTO),
    #[serde(rename = "goalDeleted")]
    GoalDeleted(DeletedTargetDTO),
}

impl RealtimeEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NewReminder(_) => "newReminder",
            Self::ReminderUpdated(_) => "reminderUpdated",
            Self::ReminderDeleted(_) => "reminderDeleted",
            Self::ReminderTriggered(_) => "reminderTriggered",
            Self::NewTask(_) => "newTask",
            Self::UpdateTask(_) => "updateTask",
            Self::DeleteTask(_) => "deleteTask",
            Self::NewGoal(_) => "newGoal",
            Self::GoalUpdated(_) => "goalUpdated",
            Self::GoalDeleted(_) => "goalDeleted",
        }
    }

    /// The payload of the event as json
    pub fn data(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            Self::NewReminder(r)
            | Self::ReminderUpdated(r)
            | Self::ReminderTriggered(r) => serde_json::to_value(r),
            Self::ReminderDeleted(deleted) => serde_json::to_value(deleted),
            Self::NewTask(task) | Self::UpdateTask(task) => serde_json::to_value(task),
            Self::NewGoal(goal) | Self::GoalUpdated(goal) => serde_json::to_value(goal),
            Self::DeleteTask(deleted) | Self::GoalDeleted(deleted) => {
                serde_json::to_value(deleted)
            }
        }
    }

    /// Rebuilds an event from its name and payload
    pub fn from_parts(event: &str, data: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(serde_json::json!({ "event": event, "data": data }))
    }
}

pub mod realtime_connect {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct QueryParams {
        pub token: String,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use taskpulse_domain::ID;

    #[test]
    fn it_uses_event_and_data_on_the_wire() {
        let goal_id = ID::new();
        let event = RealtimeEvent::GoalDeleted(DeletedTargetDTO { id: goal_id.clone() });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "goalDeleted");
        assert_eq!(json["data"]["id"], serde_json::json!(goal_id.to_string()));

        let parsed = RealtimeEvent::from_parts(event.name(), event.data().unwrap()).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn it_rejects_unknown_events() {
        assert!(RealtimeEvent::from_parts("reminderExploded", serde_json::Value::Null).is_err());
    }

    #[test]
    fn it_omits_missing_target_of_deleted_reminder() {
        let event = RealtimeEvent::ReminderDeleted(DeletedReminderDTO {
            id: ID::new(),
            target_id: None,
        });
        let json = serde_json::to_value(&event).unwrap();
        assert!(json["data"].get("targetId").is_none());
    }
}
