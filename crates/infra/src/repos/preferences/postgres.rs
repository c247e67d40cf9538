use super::IPreferencesRepo;
use taskpulse_domain::{DeliveryChannels, ReminderTimes, UserPreferences, ID};
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};

pub struct PostgresPreferencesRepo {
    pool: PgPool,
}

impl PostgresPreferencesRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserPreferencesRaw {
    user_uid: Uuid,
    default_delivery_channels: Json<DeliveryChannels>,
    default_reminder_times: Json<ReminderTimes>,
}

impl Into<UserPreferences> for UserPreferencesRaw {
    fn into(self) -> UserPreferences {
        UserPreferences {
            user_id: self.user_uid.into(),
            default_delivery_channels: self.default_delivery_channels.0,
            default_reminder_times: self.default_reminder_times.0,
        }
    }
}

#[async_trait::async_trait]
impl IPreferencesRepo for PostgresPreferencesRepo {
    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<UserPreferences>> {
        let row: Option<UserPreferencesRaw> = sqlx::query_as(
            r#"
            SELECT * FROM user_preferences AS p
            WHERE p.user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|p| p.into()))
    }

    async fn save(&self, preferences: &UserPreferences) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_preferences(user_uid, default_delivery_channels, default_reminder_times)
            VALUES($1, $2, $3)
            ON CONFLICT (user_uid) DO UPDATE SET
                default_delivery_channels = EXCLUDED.default_delivery_channels,
                default_reminder_times = EXCLUDED.default_reminder_times
            "#,
        )
        .bind(preferences.user_id.inner_ref())
        .bind(Json(preferences.default_delivery_channels))
        .bind(Json(&preferences.default_reminder_times))
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
