mod base;
mod goal;
mod preferences;
mod reminder;
pub mod session;
mod status;
mod task;
mod user;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
use goal::GoalClient;
pub use goal::{CreateGoalInput, UpdateGoalInput};
use preferences::PreferencesClient;
use reminder::ReminderClient;
pub use reminder::{CreateReminderInput, UpdateReminderInput};
use session::{SessionConfig, SessionError, SessionHandle};
use status::StatusClient;
use std::sync::Arc;
use task::TaskClient;
pub use task::{CreateTaskInput, UpdateTaskInput};
pub use taskpulse_api_structs::dtos::*;
pub use taskpulse_api_structs::update_preferences::RequestBody as UpdatePreferencesInput;
pub use taskpulse_api_structs::RealtimeEvent;
pub use taskpulse_domain::validation::ReminderValidationError as ValidationError;
pub use taskpulse_domain::{
    DeliveryChannels, ReminderKind, ReminderStatus, ReminderTimes, TargetKind, ID,
};
use user::UserClient;

// Domain
pub use taskpulse_api_structs::dtos::GoalDTO as Goal;
pub use taskpulse_api_structs::dtos::ReminderDTO as Reminder;
pub use taskpulse_api_structs::dtos::TaskDTO as Task;
pub use taskpulse_api_structs::dtos::UserDTO as User;
pub use taskpulse_api_structs::dtos::UserPreferencesDTO as UserPreferences;

/// Taskpulse SDK
///
/// The SDK contains methods for interacting with the Taskpulse server API.
/// Admin routes need an api key, the reminder routes of a `User` need a
/// session token.
#[derive(Clone)]
pub struct TaskpulseSDK {
    base: Arc<BaseClient>,
    pub goal: GoalClient,
    pub preferences: PreferencesClient,
    pub reminder: ReminderClient,
    pub status: StatusClient,
    pub task: TaskClient,
    pub user: UserClient,
}

impl TaskpulseSDK {
    fn from_base(base: BaseClient) -> Self {
        let base = Arc::new(base);
        Self {
            goal: GoalClient::new(base.clone()),
            preferences: PreferencesClient::new(base.clone()),
            reminder: ReminderClient::new(base.clone()),
            status: StatusClient::new(base.clone()),
            task: TaskClient::new(base.clone()),
            user: UserClient::new(base.clone()),
            base,
        }
    }

    /// Client for the admin routes
    pub fn new<T: Into<String>>(address: String, api_key: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_api_key(api_key.into());
        Self::from_base(base)
    }

    /// Client acting on behalf of the `User` the session token was issued to
    pub fn with_session_token<T: Into<String>>(address: String, session_token: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_session_token(session_token.into());
        Self::from_base(base)
    }

    /// Starts a reminder session for the `User` of the session token
    pub async fn start_session(
        &self,
        config: SessionConfig,
    ) -> Result<SessionHandle, SessionError> {
        let token = self
            .base
            .session_token()
            .ok_or(SessionError::MissingSessionToken)?;
        let mut url = self.base.websocket_url("realtime")?;
        url.query_pairs_mut().append_pair("token", token);

        session::start(self.reminder.clone(), url, config).await
    }
}
