use super::IReminderRepo;
use taskpulse_domain::{DeliveryChannels, Reminder, TargetKind, ID};
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    owner_uid: Uuid,
    kind: String,
    target_uid: Option<Uuid>,
    target_kind: Option<String>,
    message: String,
    remind_at: i64,
    delivery_channels: Json<DeliveryChannels>,
    status: String,
    snooze_until: Option<i64>,
    repeat_interval: Option<i64>,
    email_override: Option<String>,
    created_by: Uuid,
    is_user_created: bool,
    delivered: bool,
    created: i64,
    updated: i64,
}

impl TryFrom<ReminderRaw> for Reminder {
    type Error = anyhow::Error;

    fn try_from(raw: ReminderRaw) -> anyhow::Result<Self> {
        let target_kind = match raw.target_kind {
            Some(kind) => Some(kind.parse::<TargetKind>()?),
            None => None,
        };
        Ok(Reminder {
            id: raw.reminder_uid.into(),
            owner_id: raw.owner_uid.into(),
            kind: raw.kind.parse()?,
            target_id: raw.target_uid.map(ID::from),
            target_kind,
            message: raw.message,
            remind_at: raw.remind_at,
            delivery_channels: raw.delivery_channels.0,
            status: raw.status.parse()?,
            snooze_until: raw.snooze_until,
            repeat_interval: raw.repeat_interval,
            email_override: raw.email_override,
            created_by: raw.created_by.into(),
            is_user_created: raw.is_user_created,
            delivered: raw.delivered,
            created: raw.created,
            updated: raw.updated,
        })
    }
}

fn into_reminders(rows: Vec<ReminderRaw>) -> anyhow::Result<Vec<Reminder>> {
    rows.into_iter().map(Reminder::try_from).collect()
}

const UPSERT_SYSTEM_REMINDER: &str = r#"
    INSERT INTO reminders
    (reminder_uid, owner_uid, kind, target_uid, target_kind, message, remind_at,
     delivery_channels, status, snooze_until, repeat_interval, email_override,
     created_by, is_user_created, delivered, created, updated)
    VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
    ON CONFLICT (target_uid, target_kind, owner_uid) WHERE is_user_created = false
    DO UPDATE SET
        kind = EXCLUDED.kind,
        message = EXCLUDED.message,
        remind_at = EXCLUDED.remind_at,
        delivery_channels = EXCLUDED.delivery_channels,
        status = EXCLUDED.status,
        snooze_until = EXCLUDED.snooze_until,
        repeat_interval = EXCLUDED.repeat_interval,
        email_override = EXCLUDED.email_override,
        delivered = EXCLUDED.delivered,
        updated = EXCLUDED.updated
    RETURNING *
    "#;

const UPSERT_BY_ID: &str = r#"
    INSERT INTO reminders
    (reminder_uid, owner_uid, kind, target_uid, target_kind, message, remind_at,
     delivery_channels, status, snooze_until, repeat_interval, email_override,
     created_by, is_user_created, delivered, created, updated)
    VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
    ON CONFLICT (reminder_uid)
    DO UPDATE SET
        kind = EXCLUDED.kind,
        message = EXCLUDED.message,
        remind_at = EXCLUDED.remind_at,
        delivery_channels = EXCLUDED.delivery_channels,
        status = EXCLUDED.status,
        snooze_until = EXCLUDED.snooze_until,
        repeat_interval = EXCLUDED.repeat_interval,
        email_override = EXCLUDED.email_override,
        delivered = EXCLUDED.delivered,
        updated = EXCLUDED.updated
    RETURNING *
    "#;

impl PostgresReminderRepo {
    async fn write(&self, query: &str, reminder: &Reminder) -> anyhow::Result<Reminder> {
        let row: ReminderRaw = sqlx::query_as(query)
            .bind(reminder.id.inner_ref())
            .bind(reminder.owner_id.inner_ref())
            .bind(reminder.kind.as_str())
            .bind(reminder.target_id.as_ref().map(|id| *id.inner_ref()))
            .bind(reminder.target_kind.map(|kind| kind.as_str()))
            .bind(&reminder.message)
            .bind(reminder.remind_at)
            .bind(Json(reminder.delivery_channels))
            .bind(reminder.status.as_str())
            .bind(reminder.snooze_until)
            .bind(reminder.repeat_interval)
            .bind(&reminder.email_override)
            .bind(reminder.created_by.inner_ref())
            .bind(reminder.is_user_created)
            .bind(reminder.delivered)
            .bind(reminder.created)
            .bind(reminder.updated)
            .fetch_one(&self.pool)
            .await?;
        row.try_into()
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        self.write(UPSERT_BY_ID, reminder).await.map(|_| ())
    }

    async fn upsert(&self, reminder: &Reminder) -> anyhow::Result<Reminder> {
        if reminder.target_id.is_some() && !reminder.is_user_created {
            self.write(UPSERT_SYSTEM_REMINDER, reminder).await
        } else {
            self.write(UPSERT_BY_ID, reminder).await
        }
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        let res = sqlx::query(
            r#"
            UPDATE reminders
            SET kind = $2,
            message = $3,
            remind_at = $4,
            delivery_channels = $5,
            status = $6,
            snooze_until = $7,
            repeat_interval = $8,
            email_override = $9,
            delivered = $10,
            updated = $11
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.kind.as_str())
        .bind(&reminder.message)
        .bind(reminder.remind_at)
        .bind(Json(reminder.delivery_channels))
        .bind(reminder.status.as_str())
        .bind(reminder.snooze_until)
        .bind(reminder.repeat_interval)
        .bind(&reminder.email_override)
        .bind(reminder.delivered)
        .bind(reminder.updated)
        .execute(&self.pool)
        .await?;

        if res.rows_affected() == 0 {
            return Err(anyhow::Error::msg(format!(
                "Reminder with id: {} was not found",
                reminder.id
            )));
        }
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        let row: Option<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;
        row.map(Reminder::try_from).transpose()
    }

    async fn find_by_target(
        &self,
        target_id: &ID,
        target_kind: TargetKind,
        owner_id: &ID,
    ) -> anyhow::Result<Option<Reminder>> {
        let row: Option<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.target_uid = $1 AND r.target_kind = $2 AND r.owner_uid = $3
                AND r.is_user_created = false
            "#,
        )
        .bind(target_id.inner_ref())
        .bind(target_kind.as_str())
        .bind(owner_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;
        row.map(Reminder::try_from).transpose()
    }

    async fn find_by_owner(&self, owner_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        let rows: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.owner_uid = $1
            ORDER BY r.remind_at
            "#,
        )
        .bind(owner_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;
        into_reminders(rows)
    }

    async fn find_due(&self, now: i64) -> anyhow::Result<Vec<Reminder>> {
        let rows: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders AS r
            WHERE (r.status = 'pending' AND r.delivered = false AND r.remind_at <= $1)
                OR (r.status = 'snoozed' AND (r.snooze_until IS NULL OR r.snooze_until <= $1))
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;
        into_reminders(rows)
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        let row: Option<ReminderRaw> = sqlx::query_as(
            r#"
            DELETE FROM reminders AS r
            WHERE r.reminder_uid = $1
            RETURNING *
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;
        row.map(Reminder::try_from).transpose()
    }

    async fn delete_by_target(
        &self,
        target_id: &ID,
        target_kind: TargetKind,
        owner_id: &ID,
    ) -> anyhow::Result<Vec<Reminder>> {
        let rows: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            DELETE FROM reminders AS r
            WHERE r.target_uid = $1 AND r.target_kind = $2 AND r.owner_uid = $3
                AND r.is_user_created = false
            RETURNING *
            "#,
        )
        .bind(target_id.inner_ref())
        .bind(target_kind.as_str())
        .bind(owner_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;
        into_reminders(rows)
    }
}
