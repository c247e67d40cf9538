use super::IPreferencesRepo;
use crate::repos::shared::inmemory_repo::*;
use taskpulse_domain::{UserPreferences, ID};

pub struct InMemoryPreferencesRepo {
    preferences: std::sync::Mutex<Vec<UserPreferences>>,
}

impl InMemoryPreferencesRepo {
    pub fn new() -> Self {
        Self {
            preferences: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IPreferencesRepo for InMemoryPreferencesRepo {
    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<UserPreferences>> {
        let mut found = find_by(&self.preferences, |p| p.user_id == *user_id)?;
        Ok(found.pop())
    }

    async fn save(&self, preferences: &UserPreferences) -> anyhow::Result<()> {
        upsert_by(
            preferences,
            &self.preferences,
            |p| p.user_id == preferences.user_id,
            |_, _| {},
        )?;
        Ok(())
    }
}
