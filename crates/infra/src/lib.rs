mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, RelayConfig};
pub use repos::{IGoalRepo, IPreferencesRepo, IReminderRepo, ITaskRepo, IUserRepo, Repos};
pub use services::*;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;
use tracing::{info, warn};

#[derive(Clone)]
pub struct TaskpulseContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    /// Outgoing reminder and target events
    pub relay: Arc<dyn IEventRelay>,
    /// Realtime connections of this process
    pub hub: RealtimeHub,
    pub notifier: Arc<dyn INotificationSender>,
}

struct ContextParams {
    pub postgres_connection_string: Option<String>,
}

impl TaskpulseContext {
    async fn create(params: ContextParams) -> Self {
        let repos = match params.postgres_connection_string {
            Some(connection_string) => Repos::create_postgres(&connection_string)
                .await
                .expect("Postgres credentials must be set and valid"),
            None => {
                warn!("Did not find DATABASE_URL environment variable. Going to use inmemory repositories.");
                Repos::create_inmemory()
            }
        };
        Self::with_repos(repos, Config::new())
    }

    fn with_repos(repos: Repos, config: Config) -> Self {
        let hub = RealtimeHub::new();
        let relay: Arc<dyn IEventRelay> = match &config.relay.base_url {
            Some(base_url) => match HttpEventRelay::new(base_url, &config.relay) {
                Ok(relay) => {
                    info!("Relaying reminder events to: {}", base_url);
                    Arc::new(relay)
                }
                Err(e) => {
                    warn!(
                        "Unable to create http relay: {:?}, events will be published locally.",
                        e
                    );
                    Arc::new(HubEventRelay::new(hub.clone()))
                }
            },
            None => Arc::new(HubEventRelay::new(hub.clone())),
        };

        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            relay,
            hub,
            notifier: Arc::new(TracingNotificationSender),
        }
    }

    /// Context with inmemory repositories, used in tests
    pub fn create_inmemory() -> Self {
        Self::with_repos(Repos::create_inmemory(), Config::new())
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> TaskpulseContext {
    TaskpulseContext::create(ContextParams {
        postgres_connection_string: std::env::var("DATABASE_URL").ok(),
    })
    .await
}
