mod goal;
mod preferences;
mod reminder;
mod shared;
mod task;
mod user;

pub use goal::IGoalRepo;
use goal::{InMemoryGoalRepo, PostgresGoalRepo};
pub use preferences::IPreferencesRepo;
use preferences::{InMemoryPreferencesRepo, PostgresPreferencesRepo};
pub use reminder::IReminderRepo;
use reminder::{InMemoryReminderRepo, PostgresReminderRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use task::ITaskRepo;
use task::{InMemoryTaskRepo, PostgresTaskRepo};
use tracing::info;
pub use user::IUserRepo;
use user::{InMemoryUserRepo, PostgresUserRepo};

#[derive(Clone)]
pub struct Repos {
    pub reminders: Arc<dyn IReminderRepo>,
    pub preferences: Arc<dyn IPreferencesRepo>,
    pub users: Arc<dyn IUserRepo>,
    pub tasks: Arc<dyn ITaskRepo>,
    pub goals: Arc<dyn IGoalRepo>,
}

impl Repos {
    pub async fn create_postgres(
        connection_string: &str,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        info!("DB RUNNING MIGRATIONS ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB RUNNING MIGRATIONS ... [done]");

        Ok(Self {
            reminders: Arc::new(PostgresReminderRepo::new(pool.clone())),
            preferences: Arc::new(PostgresPreferencesRepo::new(pool.clone())),
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            tasks: Arc::new(PostgresTaskRepo::new(pool.clone())),
            goals: Arc::new(PostgresGoalRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            reminders: Arc::new(InMemoryReminderRepo::new()),
            preferences: Arc::new(InMemoryPreferencesRepo::new()),
            users: Arc::new(InMemoryUserRepo::new()),
            tasks: Arc::new(InMemoryTaskRepo::new()),
            goals: Arc::new(InMemoryGoalRepo::new()),
        }
    }
}
