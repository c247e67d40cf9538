//! Client side reminder session.
//!
//! A single actor task owns the `SessionState` and processes realtime events,
//! channel lifecycle changes and user actions in the order they arrive.
mod input;
mod realtime;
mod state;

pub use input::ReminderInput;
pub use realtime::Backoff;
pub use state::{
    Notice, NoticeLevel, SessionState, SessionView, Toast, ToastAction, ToastKind, ViewMode,
    TOAST_SNOOZE_MINUTES,
};

use crate::{
    reminder::{CreateReminderInput, ReminderClient, UpdateReminderInput},
    APIError, DeliveryChannels, ReminderDTO, ID,
};
use taskpulse_api_structs::RealtimeEvent;
use taskpulse_domain::validation::ReminderValidationError;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};
use url::Url;

const INBOX_CAPACITY: usize = 256;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionError {
    #[error("Invalid reminder: {0}")]
    Validation(#[from] ReminderValidationError),
    #[error("Request failed: {0}")]
    Api(#[from] APIError),
    #[error("A session token is required to start a reminder session")]
    MissingSessionToken,
    #[error("The reminder session has stopped")]
    Stopped,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionConfig {
    pub reconnect_backoff: Backoff,
}

type Reply<T> = oneshot::Sender<Result<T, SessionError>>;

pub(crate) enum Command {
    Realtime(RealtimeEvent),
    ChannelOpened,
    ChannelDropped,
    Snooze {
        reminder_id: ID,
        minutes: i64,
        reply: Reply<ReminderDTO>,
    },
    Dismiss {
        reminder_id: ID,
        reply: Reply<ReminderDTO>,
    },
    Create {
        input: ReminderInput,
        reply: Reply<ReminderDTO>,
    },
    Edit {
        reminder_id: ID,
        input: ReminderInput,
        reply: Reply<ReminderDTO>,
    },
    Delete {
        reminder_id: ID,
        reply: Reply<()>,
    },
    CloseToast(ID),
    SetViewMode(ViewMode),
    DrainNotices(oneshot::Sender<Vec<Notice>>),
    Snapshot(oneshot::Sender<SessionState>),
}

/// Handle to a running reminder session. The session stops when the last
/// handle is dropped.
#[derive(Clone)]
pub struct SessionHandle {
    inbox: mpsc::Sender<Command>,
}

impl SessionHandle {
    async fn request<T>(
        &self,
        command: impl FnOnce(Reply<T>) -> Command,
    ) -> Result<T, SessionError> {
        let (reply, response) = oneshot::channel();
        self.inbox
            .send(command(reply))
            .await
            .map_err(|_| SessionError::Stopped)?;
        response.await.map_err(|_| SessionError::Stopped)?
    }

    async fn tell(&self, command: Command) -> Result<(), SessionError> {
        self.inbox
            .send(command)
            .await
            .map_err(|_| SessionError::Stopped)
    }

    pub async fn snooze(&self, reminder_id: ID, minutes: i64) -> Result<ReminderDTO, SessionError> {
        self.request(|reply| Command::Snooze {
            reminder_id,
            minutes,
            reply,
        })
        .await
    }

    pub async fn dismiss(&self, reminder_id: ID) -> Result<ReminderDTO, SessionError> {
        self.request(|reply| Command::Dismiss { reminder_id, reply })
            .await
    }

    /// Runs one of the actions offered by a `Toast`
    pub async fn act_on_toast(
        &self,
        reminder_id: ID,
        action: ToastAction,
    ) -> Result<ReminderDTO, SessionError> {
        match action {
            ToastAction::Snooze { minutes } => self.snooze(reminder_id, minutes).await,
            ToastAction::Dismiss => self.dismiss(reminder_id).await,
        }
    }

    pub async fn create(&self, input: ReminderInput) -> Result<ReminderDTO, SessionError> {
        self.request(|reply| Command::Create { input, reply }).await
    }

    pub async fn edit(
        &self,
        reminder_id: ID,
        input: ReminderInput,
    ) -> Result<ReminderDTO, SessionError> {
        self.request(|reply| Command::Edit {
            reminder_id,
            input,
            reply,
        })
        .await
    }

    pub async fn delete(&self, reminder_id: ID) -> Result<(), SessionError> {
        self.request(|reply| Command::Delete { reminder_id, reply })
            .await
    }

    pub async fn close_toast(&self, reminder_id: ID) -> Result<(), SessionError> {
        self.tell(Command::CloseToast(reminder_id)).await
    }

    pub async fn set_view_mode(&self, view_mode: ViewMode) -> Result<(), SessionError> {
        self.tell(Command::SetViewMode(view_mode)).await
    }

    /// Returns the notices raised since the last call
    pub async fn drain_notices(&self) -> Result<Vec<Notice>, SessionError> {
        let (reply, response) = oneshot::channel();
        self.tell(Command::DrainNotices(reply)).await?;
        response.await.map_err(|_| SessionError::Stopped)
    }

    /// A copy of the current session state
    pub async fn snapshot(&self) -> Result<SessionState, SessionError> {
        let (reply, response) = oneshot::channel();
        self.tell(Command::Snapshot(reply)).await?;
        response.await.map_err(|_| SessionError::Stopped)
    }
}

struct SessionActor {
    reminders: ReminderClient,
    state: SessionState,
    inbox: mpsc::Receiver<Command>,
    /// Set while events may have been missed, the next open re-fetches everything.
    /// Starts out set since events published before the first open are not received.
    stale: bool,
}

/// Fetches the reminders of the session `User`, opens the realtime channel
/// and spawns the session actor
pub(crate) async fn start(
    reminders: ReminderClient,
    realtime_url: Url,
    config: SessionConfig,
) -> Result<SessionHandle, SessionError> {
    let mut state = SessionState::default();
    state.replace_all(reminders.list().await?.reminders);

    let (sender, inbox) = mpsc::channel(INBOX_CAPACITY);
    let channel = tokio::spawn(realtime::run_channel(
        realtime_url,
        sender.downgrade(),
        config.reconnect_backoff,
    ));

    let actor = SessionActor {
        reminders,
        state,
        inbox,
        stale: true,
    };
    tokio::spawn(async move {
        actor.run().await;
        channel.abort();
        info!("Reminder session stopped");
    });

    Ok(SessionHandle { inbox: sender })
}

fn success(state: &mut SessionState, message: &str) {
    state.notify(NoticeLevel::Success, message);
}

fn failure(state: &mut SessionState, message: &str, error: &SessionError) {
    state.notify(NoticeLevel::Failure, format!("{}: {}", message, error));
}

impl SessionActor {
    async fn run(mut self) {
        while let Some(command) = self.inbox.recv().await {
            self.handle(command).await;
        }
    }

    async fn handle(&mut self, command: Command) {
        match command {
            Command::Realtime(event) => self.state.apply(event),
            Command::ChannelOpened => {
                self.state.connected = true;
                if self.stale {
                    self.refetch().await;
                }
            }
            Command::ChannelDropped => {
                self.state.connected = false;
                self.stale = true;
            }
            Command::Snooze {
                reminder_id,
                minutes,
                reply,
            } => {
                let res = self
                    .reminders
                    .snooze(reminder_id.clone(), minutes)
                    .await
                    .map(|res| res.reminder)
                    .map_err(SessionError::from);
                let res = self.confirm(
                    &reminder_id,
                    res,
                    "Reminder snoozed",
                    "Unable to snooze reminder",
                );
                let _ = reply.send(res);
            }
            Command::Dismiss { reminder_id, reply } => {
                let res = self
                    .reminders
                    .dismiss(reminder_id.clone())
                    .await
                    .map(|res| res.reminder)
                    .map_err(SessionError::from);
                let res = self.confirm(
                    &reminder_id,
                    res,
                    "Reminder dismissed",
                    "Unable to dismiss reminder",
                );
                let _ = reply.send(res);
            }
            Command::Create { input, reply } => {
                let res = self.create(input).await;
                match &res {
                    Ok(reminder) => {
                        self.state.upsert(reminder.clone());
                        success(&mut self.state, "Reminder created");
                    }
                    Err(e) => failure(&mut self.state, "Unable to create reminder", e),
                }
                let _ = reply.send(res);
            }
            Command::Edit {
                reminder_id,
                input,
                reply,
            } => {
                let res = self.edit(reminder_id, input).await;
                match &res {
                    Ok(reminder) => {
                        self.state.upsert(reminder.clone());
                        success(&mut self.state, "Reminder updated");
                    }
                    Err(e) => failure(&mut self.state, "Unable to update reminder", e),
                }
                let _ = reply.send(res);
            }
            Command::Delete { reminder_id, reply } => {
                let res = self
                    .reminders
                    .delete(reminder_id.clone())
                    .await
                    .map(|_| ())
                    .map_err(SessionError::from);
                match &res {
                    Ok(()) => {
                        self.state.remove(&reminder_id);
                        success(&mut self.state, "Reminder deleted");
                    }
                    Err(e) => failure(&mut self.state, "Unable to delete reminder", e),
                }
                let _ = reply.send(res);
            }
            Command::CloseToast(reminder_id) => self.state.close_toast(&reminder_id),
            Command::SetViewMode(view_mode) => self.state.view_mode = view_mode,
            Command::DrainNotices(reply) => {
                let _ = reply.send(std::mem::take(&mut self.state.notices));
            }
            Command::Snapshot(reply) => {
                let _ = reply.send(self.state.clone());
            }
        }
    }

    /// Applies the server confirmed result of a toast action
    fn confirm(
        &mut self,
        reminder_id: &ID,
        res: Result<ReminderDTO, SessionError>,
        on_success: &str,
        on_failure: &str,
    ) -> Result<ReminderDTO, SessionError> {
        self.state.close_toast(reminder_id);
        match &res {
            Ok(reminder) => {
                self.state.upsert(reminder.clone());
                success(&mut self.state, on_success);
            }
            Err(e) => failure(&mut self.state, on_failure, e),
        }
        res
    }

    async fn create(&self, input: ReminderInput) -> Result<ReminderDTO, SessionError> {
        let input = input.normalized();
        input.validate()?;

        let input = CreateReminderInput {
            kind: input.kind,
            message: input.message,
            remind_at: input.remind_at,
            delivery_channels: input.delivery_channels,
            repeat_interval: input.repeat_interval,
            email_override: input.email_override,
        };
        Ok(self.reminders.create(input).await?.reminder)
    }

    async fn edit(
        &self,
        reminder_id: ID,
        input: ReminderInput,
    ) -> Result<ReminderDTO, SessionError> {
        let input = input.normalized();
        input.validate()?;

        let delivery_channels = input
            .delivery_channels
            .or_else(|| self.state.find(&reminder_id).map(|r| r.delivery_channels))
            .unwrap_or_else(DeliveryChannels::default);
        let input = UpdateReminderInput {
            reminder_id,
            message: input.message,
            remind_at: input.remind_at,
            delivery_channels,
            repeat_interval: input.repeat_interval,
            email_override: input.email_override,
        };
        Ok(self.reminders.update(input).await?.reminder)
    }

    async fn refetch(&mut self) {
        match self.reminders.list().await {
            Ok(res) => {
                self.state.replace_all(res.reminders);
                self.stale = false;
                info!("Reminders re-fetched after the realtime channel opened");
            }
            Err(e) => {
                warn!("Unable to re-fetch reminders: {}", e);
                failure(
                    &mut self.state,
                    "Unable to refresh reminders",
                    &SessionError::Api(e),
                );
            }
        }
    }
}
