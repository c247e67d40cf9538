use super::IGoalRepo;
use taskpulse_domain::{Goal, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresGoalRepo {
    pool: PgPool,
}

impl PostgresGoalRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct GoalRaw {
    goal_uid: Uuid,
    owner_uid: Uuid,
    title: String,
    end_date: Option<i64>,
    created: i64,
    updated: i64,
}

impl Into<Goal> for GoalRaw {
    fn into(self) -> Goal {
        Goal {
            id: self.goal_uid.into(),
            owner_id: self.owner_uid.into(),
            title: self.title,
            end_date: self.end_date,
            created: self.created,
            updated: self.updated,
        }
    }
}

#[async_trait::async_trait]
impl IGoalRepo for PostgresGoalRepo {
    async fn insert(&self, goal: &Goal) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO goals(goal_uid, owner_uid, title, end_date, created, updated)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(goal.id.inner_ref())
        .bind(goal.owner_id.inner_ref())
        .bind(&goal.title)
        .bind(goal.end_date)
        .bind(goal.created)
        .bind(goal.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, goal: &Goal) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE goals
            SET owner_uid = $2,
            title = $3,
            end_date = $4,
            updated = $5
            WHERE goal_uid = $1
            "#,
        )
        .bind(goal.id.inner_ref())
        .bind(goal.owner_id.inner_ref())
        .bind(&goal.title)
        .bind(goal.end_date)
        .bind(goal.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, goal_id: &ID) -> anyhow::Result<Option<Goal>> {
        let goal: Option<GoalRaw> = sqlx::query_as(
            r#"
            SELECT * FROM goals AS g
            WHERE g.goal_uid = $1
            "#,
        )
        .bind(goal_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(goal.map(|g| g.into()))
    }

    async fn delete(&self, goal_id: &ID) -> anyhow::Result<Option<Goal>> {
        let goal: Option<GoalRaw> = sqlx::query_as(
            r#"
            DELETE FROM goals AS g
            WHERE g.goal_uid = $1
            RETURNING *
            "#,
        )
        .bind(goal_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(goal.map(|g| g.into()))
    }
}
