use super::ITaskRepo;
use taskpulse_domain::{Task, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresTaskRepo {
    pool: PgPool,
}

impl PostgresTaskRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TaskRaw {
    task_uid: Uuid,
    owner_uid: Uuid,
    title: String,
    due_date: Option<i64>,
    created: i64,
    updated: i64,
}

impl Into<Task> for TaskRaw {
    fn into(self) -> Task {
        Task {
            id: self.task_uid.into(),
            owner_id: self.owner_uid.into(),
            title: self.title,
            due_date: self.due_date,
            created: self.created,
            updated: self.updated,
        }
    }
}

#[async_trait::async_trait]
impl ITaskRepo for PostgresTaskRepo {
    async fn insert(&self, task: &Task) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO tasks(task_uid, owner_uid, title, due_date, created, updated)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(task.id.inner_ref())
        .bind(task.owner_id.inner_ref())
        .bind(&task.title)
        .bind(task.due_date)
        .bind(task.created)
        .bind(task.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, task: &Task) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE tasks
            SET owner_uid = $2,
            title = $3,
            due_date = $4,
            updated = $5
            WHERE task_uid = $1
            "#,
        )
        .bind(task.id.inner_ref())
        .bind(task.owner_id.inner_ref())
        .bind(&task.title)
        .bind(task.due_date)
        .bind(task.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, task_id: &ID) -> anyhow::Result<Option<Task>> {
        let task: Option<TaskRaw> = sqlx::query_as(
            r#"
            SELECT * FROM tasks AS t
            WHERE t.task_uid = $1
            "#,
        )
        .bind(task_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(task.map(|t| t.into()))
    }

    async fn delete(&self, task_id: &ID) -> anyhow::Result<Option<Task>> {
        let task: Option<TaskRaw> = sqlx::query_as(
            r#"
            DELETE FROM tasks AS t
            WHERE t.task_uid = $1
            RETURNING *
            "#,
        )
        .bind(task_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(task.map(|t| t.into()))
    }
}
