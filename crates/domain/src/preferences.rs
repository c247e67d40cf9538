use crate::{
    reminder::{DeliveryChannels, ReminderKind},
    shared::entity::ID,
    validation::MAX_OFFSET_MINUTES,
};
use serde::{Deserialize, Serialize};

/// Lead time in minutes before the deadline for every `ReminderKind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderTimes {
    pub task_due: i64,
    pub goal_deadline: i64,
    pub meeting: i64,
    pub appraisal_submission: i64,
    pub manager_feedback: i64,
    pub custom: i64,
}

impl ReminderTimes {
    pub fn lead_time(&self, kind: ReminderKind) -> i64 {
        match kind {
            ReminderKind::TaskDue => self.task_due,
            ReminderKind::GoalDeadline => self.goal_deadline,
            ReminderKind::Meeting => self.meeting,
            ReminderKind::AppraisalSubmission => self.appraisal_submission,
            ReminderKind::ManagerFeedback => self.manager_feedback,
            ReminderKind::Custom => self.custom,
        }
    }

    pub fn is_valid(&self) -> bool {
        [
            self.task_due,
            self.goal_deadline,
            self.meeting,
            self.appraisal_submission,
            self.manager_feedback,
            self.custom,
        ]
        .iter()
        .all(|minutes| (0..=MAX_OFFSET_MINUTES).contains(minutes))
    }
}

impl Default for ReminderTimes {
    fn default() -> Self {
        Self {
            task_due: 60,
            goal_deadline: 60 * 24,
            meeting: 15,
            appraisal_submission: 60 * 24,
            manager_feedback: 60 * 24,
            custom: 30,
        }
    }
}

/// The notification preferences of a `User`
#[derive(Debug, Clone, PartialEq)]
pub struct UserPreferences {
    pub user_id: ID,
    pub default_delivery_channels: DeliveryChannels,
    pub default_reminder_times: ReminderTimes,
}

impl UserPreferences {
    /// The preferences used for a `User` who has not stored any
    pub fn new(user_id: ID) -> Self {
        Self {
            user_id,
            default_delivery_channels: Default::default(),
            default_reminder_times: Default::default(),
        }
    }

    /// Computes when a `Reminder` of the given kind should trigger for a deadline
    pub fn remind_at(&self, kind: ReminderKind, deadline: i64) -> i64 {
        let lead_millis = self
            .default_reminder_times
            .lead_time(kind)
            .saturating_mul(60 * 1000);
        deadline.saturating_sub(lead_millis)
    }
}
