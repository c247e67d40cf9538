use crate::{
    shared::entity::{Entity, ID},
    target::{ReminderTarget, TargetKind},
    validation::{validate_email, validate_repeat_interval, ReminderValidationError},
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const MINUTE_MILLIS: i64 = 60 * 1000;

/// The kind of a `Reminder`. It decides the default lead time
/// taken from the owners `UserPreferences`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderKind {
    TaskDue,
    GoalDeadline,
    Meeting,
    AppraisalSubmission,
    ManagerFeedback,
    Custom,
}

impl ReminderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TaskDue => "task_due",
            Self::GoalDeadline => "goal_deadline",
            Self::Meeting => "meeting",
            Self::AppraisalSubmission => "appraisal_submission",
            Self::ManagerFeedback => "manager_feedback",
            Self::Custom => "custom",
        }
    }
}

impl FromStr for ReminderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "task_due" => Ok(Self::TaskDue),
            "goal_deadline" => Ok(Self::GoalDeadline),
            "meeting" => Ok(Self::Meeting),
            "appraisal_submission" => Ok(Self::AppraisalSubmission),
            "manager_feedback" => Ok(Self::ManagerFeedback),
            "custom" => Ok(Self::Custom),
            _ => Err(anyhow::Error::msg(format!("Unknown reminder kind: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryChannels {
    pub in_app: bool,
    pub email: bool,
    pub push: bool,
}

impl DeliveryChannels {
    pub fn is_empty(&self) -> bool {
        !self.in_app && !self.email && !self.push
    }
}

impl Default for DeliveryChannels {
    fn default() -> Self {
        Self {
            in_app: true,
            email: true,
            push: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Pending,
    Dismissed,
    Snoozed,
}

impl ReminderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Dismissed => "dismissed",
            Self::Snoozed => "snoozed",
        }
    }
}

impl FromStr for ReminderStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "dismissed" => Ok(Self::Dismissed),
            "snoozed" => Ok(Self::Snoozed),
            _ => Err(anyhow::Error::msg(format!("Unknown reminder status: {}", s))),
        }
    }
}

/// A `Reminder` is a notification that should be delivered to its owner
/// at `remind_at` through the selected `DeliveryChannels`.
///
/// Reminders are either system generated from the deadline of a `Task`
/// or `Goal`, in which case there is at most one per (target, owner), or
/// created directly by the owner.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// The `User` receiving this `Reminder`
    pub owner_id: ID,
    pub kind: ReminderKind,
    /// The `Task` or `Goal` this `Reminder` belongs to. None for custom reminders.
    pub target_id: Option<ID>,
    pub target_kind: Option<TargetKind>,
    pub message: String,
    /// Timestamp in millis at which the owner should be notified
    pub remind_at: i64,
    pub delivery_channels: DeliveryChannels,
    pub status: ReminderStatus,
    pub snooze_until: Option<i64>,
    /// Minutes between deliveries for repeating reminders
    pub repeat_interval: Option<i64>,
    /// Email address used instead of the owners account email
    pub email_override: Option<String>,
    pub created_by: ID,
    pub is_user_created: bool,
    /// Set when a non repeating reminder has been delivered, so that
    /// the dispatcher does not deliver it twice
    pub delivered: bool,
    pub created: i64,
    pub updated: i64,
}

impl Reminder {
    /// Creates a system generated `Reminder` for the given target
    pub fn new_for_target(
        target: &ReminderTarget,
        owner_id: &ID,
        remind_at: i64,
        delivery_channels: DeliveryChannels,
        now: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            owner_id: owner_id.clone(),
            kind: target.kind.reminder_kind(),
            target_id: Some(target.id.clone()),
            target_kind: Some(target.kind),
            message: target.reminder_message(),
            remind_at,
            delivery_channels,
            status: ReminderStatus::Pending,
            snooze_until: None,
            repeat_interval: None,
            email_override: None,
            created_by: owner_id.clone(),
            is_user_created: false,
            delivered: false,
            created: now,
            updated: now,
        }
    }

    pub fn new_user_created(
        owner_id: &ID,
        kind: ReminderKind,
        message: String,
        remind_at: i64,
        delivery_channels: DeliveryChannels,
        now: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            owner_id: owner_id.clone(),
            kind,
            target_id: None,
            target_kind: None,
            message,
            remind_at,
            delivery_channels,
            status: ReminderStatus::Pending,
            snooze_until: None,
            repeat_interval: None,
            email_override: None,
            created_by: owner_id.clone(),
            is_user_created: true,
            delivered: false,
            created: now,
            updated: now,
        }
    }

    /// Aligns a system generated `Reminder` with the current state of its target.
    /// Returns `false` if the `Reminder` was already in sync and nothing changed.
    pub fn refresh_from_target(
        &mut self,
        target: &ReminderTarget,
        remind_at: i64,
        delivery_channels: DeliveryChannels,
        now: i64,
    ) -> bool {
        let message = target.reminder_message();
        let in_sync = self.message == message
            && self.remind_at == remind_at
            && self.delivery_channels == delivery_channels
            && self.status == ReminderStatus::Pending
            && self.snooze_until.is_none();
        if in_sync {
            return false;
        }

        if self.remind_at != remind_at {
            self.delivered = false;
        }
        self.message = message;
        self.remind_at = remind_at;
        self.delivery_channels = delivery_channels;
        self.status = ReminderStatus::Pending;
        self.snooze_until = None;
        self.updated = now;
        true
    }

    pub fn set_repeat_interval(
        &mut self,
        repeat_interval: Option<i64>,
    ) -> Result<(), ReminderValidationError> {
        validate_repeat_interval(repeat_interval)?;
        self.repeat_interval = repeat_interval;
        Ok(())
    }

    pub fn set_email_override(
        &mut self,
        email_override: Option<String>,
    ) -> Result<(), ReminderValidationError> {
        if let Some(email) = &email_override {
            validate_email(email)?;
        }
        self.email_override = email_override;
        Ok(())
    }

    pub fn snooze(&mut self, minutes: i64, now: i64) {
        self.status = ReminderStatus::Snoozed;
        self.snooze_until = Some(now.saturating_add(minutes.saturating_mul(MINUTE_MILLIS)));
        self.updated = now;
    }

    pub fn dismiss(&mut self, now: i64) {
        self.status = ReminderStatus::Dismissed;
        self.snooze_until = None;
        self.updated = now;
    }

    pub fn snooze_elapsed(&self, now: i64) -> bool {
        self.status == ReminderStatus::Snoozed
            && self.snooze_until.map(|until| until <= now).unwrap_or(true)
    }

    /// Returns an elapsed snoozed `Reminder` back to pending
    pub fn wake(&mut self, now: i64) {
        self.status = ReminderStatus::Pending;
        self.snooze_until = None;
        self.updated = now;
    }

    /// Whether the `Reminder` should be delivered at `now`
    pub fn is_due(&self, now: i64) -> bool {
        match self.status {
            ReminderStatus::Pending => !self.delivered && self.remind_at <= now,
            ReminderStatus::Snoozed => {
                self.snooze_elapsed(now) && (self.delivered || self.remind_at <= now)
            }
            ReminderStatus::Dismissed => false,
        }
    }

    /// Moves the `Reminder` to its state after it has been delivered.
    /// Repeating reminders are rescheduled `repeat_interval` minutes later,
    /// other reminders are marked as delivered.
    pub fn advance_after_delivery(&mut self, now: i64) {
        self.status = ReminderStatus::Pending;
        self.snooze_until = None;
        match self.repeat_interval {
            Some(interval) => {
                self.remind_at = self
                    .remind_at
                    .saturating_add(interval.saturating_mul(MINUTE_MILLIS));
                self.delivered = false;
            }
            None => self.delivered = true,
        }
        self.updated = now;
    }

    pub fn is_for_target(&self, target_id: &ID, target_kind: TargetKind) -> bool {
        self.target_id.as_ref() == Some(target_id) && self.target_kind == Some(target_kind)
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}
