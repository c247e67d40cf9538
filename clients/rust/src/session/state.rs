use crate::{ReminderDTO, ID};
use chrono::{NaiveDate, TimeZone, Utc};
use std::collections::BTreeMap;
use taskpulse_api_structs::RealtimeEvent;

/// Minutes a reminder is snoozed for from a toast
pub const TOAST_SNOOZE_MINUTES: i64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
    Calendar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    NewReminder,
    Triggered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastAction {
    Snooze { minutes: i64 },
    Dismiss,
}

/// An actionable popup for a single reminder
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub reminder_id: ID,
    pub message: String,
    pub kind: ToastKind,
}

impl Toast {
    pub fn actions(&self) -> [ToastAction; 2] {
        [
            ToastAction::Snooze {
                minutes: TOAST_SNOOZE_MINUTES,
            },
            ToastAction::Dismiss,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Failure,
}

/// Transient outcome of a user action
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// The reminders as shown in the current `ViewMode`
#[derive(Debug, Clone, PartialEq)]
pub enum SessionView {
    /// Newest first
    Grid(Vec<ReminderDTO>),
    /// Ordered by `remind_at`
    List(Vec<ReminderDTO>),
    Calendar(BTreeMap<NaiveDate, Vec<ReminderDTO>>),
}

/// Client side state of a reminder session. Mutated only by the session actor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// Newest first
    pub reminders: Vec<ReminderDTO>,
    pub view_mode: ViewMode,
    pub toasts: Vec<Toast>,
    pub notices: Vec<Notice>,
    /// Whether the realtime channel is currently open
    pub connected: bool,
}

impl SessionState {
    pub fn find(&self, reminder_id: &ID) -> Option<&ReminderDTO> {
        self.reminders.iter().find(|r| &r.id == reminder_id)
    }

    /// Replaces the local list with a freshly fetched one
    pub fn replace_all(&mut self, mut reminders: Vec<ReminderDTO>) {
        reminders.sort_by(|a, b| b.created.cmp(&a.created));
        self.reminders = reminders;
    }

    /// Replaces a known reminder in place, returns false when it was prepended
    pub fn upsert(&mut self, reminder: ReminderDTO) -> bool {
        match self.reminders.iter_mut().find(|r| r.id == reminder.id) {
            Some(existing) => {
                *existing = reminder;
                true
            }
            None => {
                self.reminders.insert(0, reminder);
                false
            }
        }
    }

    pub fn remove(&mut self, reminder_id: &ID) {
        self.reminders.retain(|r| &r.id != reminder_id);
        self.close_toast(reminder_id);
    }

    fn remove_by_target(&mut self, target_id: &ID) {
        let removed = self
            .reminders
            .iter()
            .filter(|r| r.target_id.as_ref() == Some(target_id))
            .map(|r| r.id.clone())
            .collect::<Vec<_>>();
        for reminder_id in &removed {
            self.remove(reminder_id);
        }
    }

    fn raise_toast(&mut self, reminder: &ReminderDTO, kind: ToastKind) {
        self.close_toast(&reminder.id);
        self.toasts.push(Toast {
            reminder_id: reminder.id.clone(),
            message: reminder.message.clone(),
            kind,
        });
    }

    pub fn close_toast(&mut self, reminder_id: &ID) {
        self.toasts.retain(|t| &t.reminder_id != reminder_id);
    }

    pub fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice {
            level,
            message: message.into(),
        });
    }

    /// Applies an event received over the realtime channel
    pub fn apply(&mut self, event: RealtimeEvent) {
        match event {
            RealtimeEvent::NewReminder(reminder) => {
                let known = self.upsert(reminder.clone());
                if !known {
                    self.raise_toast(&reminder, ToastKind::NewReminder);
                }
            }
            RealtimeEvent::ReminderUpdated(reminder) => {
                self.upsert(reminder);
            }
            RealtimeEvent::ReminderDeleted(deleted) => self.remove(&deleted.id),
            RealtimeEvent::ReminderTriggered(reminder) => {
                self.upsert(reminder.clone());
                self.raise_toast(&reminder, ToastKind::Triggered);
            }
            RealtimeEvent::DeleteTask(target) | RealtimeEvent::GoalDeleted(target) => {
                self.remove_by_target(&target.id)
            }
            RealtimeEvent::NewTask(_)
            | RealtimeEvent::UpdateTask(_)
            | RealtimeEvent::NewGoal(_)
            | RealtimeEvent::GoalUpdated(_) => {}
        }
    }

    /// Reminders grouped by the UTC day of their `remind_at`
    pub fn calendar(&self) -> BTreeMap<NaiveDate, Vec<ReminderDTO>> {
        let mut days: BTreeMap<NaiveDate, Vec<ReminderDTO>> = BTreeMap::new();
        for reminder in &self.reminders {
            if let Some(at) = Utc.timestamp_millis_opt(reminder.remind_at).single() {
                days.entry(at.date_naive()).or_default().push(reminder.clone());
            }
        }
        for reminders in days.values_mut() {
            reminders.sort_by_key(|r| r.remind_at);
        }
        days
    }

    pub fn view(&self) -> SessionView {
        match self.view_mode {
            ViewMode::Grid => SessionView::Grid(self.reminders.clone()),
            ViewMode::List => {
                let mut reminders = self.reminders.clone();
                reminders.sort_by_key(|r| r.remind_at);
                SessionView::List(reminders)
            }
            ViewMode::Calendar => SessionView::Calendar(self.calendar()),
        }
    }
}
