use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use taskpulse_domain::{Reminder, ReminderStatus, TargetKind, ID};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(Vec::new()),
        }
    }
}

fn is_system_reminder_for(
    reminder: &Reminder,
    target_id: &ID,
    target_kind: TargetKind,
    owner_id: &ID,
) -> bool {
    !reminder.is_user_created
        && reminder.owner_id == *owner_id
        && reminder.is_for_target(target_id, target_kind)
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert(reminder, &self.reminders)
    }

    async fn upsert(&self, reminder: &Reminder) -> anyhow::Result<Reminder> {
        let key = match (&reminder.target_id, reminder.target_kind) {
            (Some(target_id), Some(target_kind)) if !reminder.is_user_created => {
                Some((target_id.clone(), target_kind))
            }
            _ => None,
        };
        upsert_by(
            reminder,
            &self.reminders,
            |r| match &key {
                Some((target_id, target_kind)) => {
                    is_system_reminder_for(r, target_id, *target_kind, &reminder.owner_id)
                }
                None => r.id == reminder.id,
            },
            |stored, existing| {
                stored.id = existing.id.clone();
                stored.created = existing.created;
            },
        )
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        save(reminder, &self.reminders)
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        find(reminder_id, &self.reminders)
    }

    async fn find_by_target(
        &self,
        target_id: &ID,
        target_kind: TargetKind,
        owner_id: &ID,
    ) -> anyhow::Result<Option<Reminder>> {
        let reminders = find_by(&self.reminders, |r| {
            is_system_reminder_for(r, target_id, target_kind, owner_id)
        })?;
        Ok(reminders.into_iter().next())
    }

    async fn find_by_owner(&self, owner_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        let mut reminders = find_by(&self.reminders, |r| r.owner_id == *owner_id)?;
        reminders.sort_by_key(|r| r.remind_at);
        Ok(reminders)
    }

    async fn find_due(&self, now: i64) -> anyhow::Result<Vec<Reminder>> {
        find_by(&self.reminders, |r| match r.status {
            ReminderStatus::Pending => !r.delivered && r.remind_at <= now,
            ReminderStatus::Snoozed => r.snooze_until.map(|s| s <= now).unwrap_or(true),
            ReminderStatus::Dismissed => false,
        })
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        delete(reminder_id, &self.reminders)
    }

    async fn delete_by_target(
        &self,
        target_id: &ID,
        target_kind: TargetKind,
        owner_id: &ID,
    ) -> anyhow::Result<Vec<Reminder>> {
        find_and_delete_by(&self.reminders, |r| {
            is_system_reminder_for(r, target_id, target_kind, owner_id)
        })
    }
}
