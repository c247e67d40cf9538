mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;
use taskpulse_domain::{Reminder, TargetKind, ID};

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    /// Stores a `Reminder`. A system generated `Reminder` replaces the existing one
    /// with the same (target, owner) key and keeps its id, so that there is never
    /// more than one per key.
    async fn upsert(&self, reminder: &Reminder) -> anyhow::Result<Reminder>;
    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>>;
    /// Finds the system generated `Reminder` of a target for the given owner
    async fn find_by_target(
        &self,
        target_id: &ID,
        target_kind: TargetKind,
        owner_id: &ID,
    ) -> anyhow::Result<Option<Reminder>>;
    async fn find_by_owner(&self, owner_id: &ID) -> anyhow::Result<Vec<Reminder>>;
    /// Pending reminders that should have been delivered by `now` and
    /// snoozed reminders whose snooze has elapsed
    async fn find_due(&self, now: i64) -> anyhow::Result<Vec<Reminder>>;
    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>>;
    /// Deletes the system generated reminders of a target for the given owner
    async fn delete_by_target(
        &self,
        target_id: &ID,
        target_kind: TargetKind,
        owner_id: &ID,
    ) -> anyhow::Result<Vec<Reminder>>;
}
