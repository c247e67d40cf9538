use crate::shared::{relay::emit, usecase::UseCase};
use std::collections::{HashMap, HashSet};
use taskpulse_api_structs::{dtos::ReminderDTO, RealtimeEvent};
use taskpulse_domain::{Reminder, User, ID};
use taskpulse_infra::TaskpulseContext;
use tracing::{debug, error, warn};

/// Delivers every `Reminder` that is due through its delivery channels and
/// moves it to its next state
#[derive(Debug)]
pub struct DeliverDueRemindersUseCase {}

#[derive(Debug, Default, PartialEq)]
pub struct DeliveryReport {
    /// Reminders that were delivered
    pub delivered: usize,
    /// Snoozed reminders whose snooze elapsed before they were due
    pub woken: usize,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

async fn deliver(reminder: &Reminder, owner: Option<&User>, ctx: &TaskpulseContext) {
    let channels = reminder.delivery_channels;
    if channels.in_app {
        let event = RealtimeEvent::ReminderTriggered(ReminderDTO::new(reminder.clone()));
        emit(event, &reminder.owner_id, ctx).await;
    }

    if channels.email {
        let to = reminder
            .email_override
            .as_deref()
            .or_else(|| owner.map(|user| user.email.as_str()));
        match to {
            Some(to) => {
                if let Err(e) = ctx.notifier.send_email(to, reminder).await {
                    error!(
                        "Unable to send email for reminder: {}. Error: {:?}",
                        reminder.id, e
                    );
                }
            }
            None => warn!(
                "No email address found for the owner of reminder: {}",
                reminder.id
            ),
        }
    }

    if channels.push {
        match owner.and_then(|user| user.push_token.as_deref()) {
            Some(push_token) => {
                if let Err(e) = ctx.notifier.send_push(push_token, reminder).await {
                    error!(
                        "Unable to send push notification for reminder: {}. Error: {:?}",
                        reminder.id, e
                    );
                }
            }
            None => debug!(
                "The owner of reminder: {} has not registered a device for push notifications",
                reminder.id
            ),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeliverDueRemindersUseCase {
    type Response = DeliveryReport;

    type Error = UseCaseError;

    const NAME: &'static str = "DeliverDueReminders";

    async fn execute(&mut self, ctx: &TaskpulseContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let reminders = ctx
            .repos
            .reminders
            .find_due(now)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let mut report = DeliveryReport::default();
        if reminders.is_empty() {
            return Ok(report);
        }

        let owner_ids = reminders
            .iter()
            .map(|r| r.owner_id.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect::<Vec<_>>();
        let owners = ctx
            .repos
            .users
            .find_many(&owner_ids)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .into_iter()
            .map(|user| (user.id.clone(), user))
            .collect::<HashMap<ID, User>>();

        for mut reminder in reminders {
            if reminder.is_due(now) {
                deliver(&reminder, owners.get(&reminder.owner_id), ctx).await;
                reminder.advance_after_delivery(now);
                report.delivered += 1;
            } else if reminder.snooze_elapsed(now) {
                reminder.wake(now);
                report.woken += 1;
            } else {
                continue;
            }

            ctx.repos
                .reminders
                .save(&reminder)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
        }

        Ok(report)
    }
}
