mod inmemory;
mod postgres;

pub use inmemory::InMemoryPreferencesRepo;
pub use postgres::PostgresPreferencesRepo;
use taskpulse_domain::{UserPreferences, ID};

#[async_trait::async_trait]
pub trait IPreferencesRepo: Send + Sync {
    /// The stored preferences of a `User`, if any
    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<UserPreferences>>;
    async fn save(&self, preferences: &UserPreferences) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_replaces_stored_preferences() {
        let repo = InMemoryPreferencesRepo::new();
        let user_id = ID::new();
        assert!(repo.find(&user_id).await.unwrap().is_none());

        let mut prefs = UserPreferences::new(user_id.clone());
        repo.save(&prefs).await.unwrap();
        prefs.default_reminder_times.task_due = 0;
        prefs.default_delivery_channels.email = false;
        repo.save(&prefs).await.unwrap();

        let stored = repo.find(&user_id).await.unwrap().unwrap();
        assert_eq!(stored, prefs);
    }
}
