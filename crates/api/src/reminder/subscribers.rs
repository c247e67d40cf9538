use super::{
    create_reminder::CreateReminderUseCase,
    delete_reminder::DeleteReminderUseCase,
    delete_target_reminders::DeleteTargetRemindersUseCase,
    dismiss_reminder::DismissReminderUseCase,
    snooze_reminder::SnoozeReminderUseCase,
    sync_reminder::{SyncReminderResponse, SyncReminderUseCase},
    update_reminder::UpdateReminderUseCase,
};
use crate::shared::{relay::emit, usecase::Subscriber};
use taskpulse_api_structs::{
    dtos::{DeletedReminderDTO, ReminderDTO},
    RealtimeEvent,
};
use taskpulse_domain::Reminder;
use taskpulse_infra::TaskpulseContext;

async fn emit_reminder_deleted(reminder: &Reminder, ctx: &TaskpulseContext) {
    let event = RealtimeEvent::ReminderDeleted(DeletedReminderDTO {
        id: reminder.id.clone(),
        target_id: reminder.target_id.clone(),
    });
    emit(event, &reminder.owner_id, ctx).await;
}

async fn emit_reminder_updated(reminder: &Reminder, ctx: &TaskpulseContext) {
    let event = RealtimeEvent::ReminderUpdated(ReminderDTO::new(reminder.clone()));
    emit(event, &reminder.owner_id, ctx).await;
}

pub struct RelaySyncedReminder;

#[async_trait::async_trait(?Send)]
impl Subscriber<SyncReminderUseCase> for RelaySyncedReminder {
    async fn notify(&self, e: &SyncReminderResponse, ctx: &TaskpulseContext) {
        match e {
            SyncReminderResponse::Created(reminder) => {
                let event = RealtimeEvent::NewReminder(ReminderDTO::new(reminder.clone()));
                emit(event, &reminder.owner_id, ctx).await;
            }
            SyncReminderResponse::Updated(reminder) => emit_reminder_updated(reminder, ctx).await,
            SyncReminderResponse::Unchanged(_) => {}
            SyncReminderResponse::Deleted(reminders) => {
                for reminder in reminders {
                    emit_reminder_deleted(reminder, ctx).await;
                }
            }
        }
    }
}

pub struct RelayDeletedTargetReminders;

#[async_trait::async_trait(?Send)]
impl Subscriber<DeleteTargetRemindersUseCase> for RelayDeletedTargetReminders {
    async fn notify(&self, reminders: &Vec<Reminder>, ctx: &TaskpulseContext) {
        for reminder in reminders {
            emit_reminder_deleted(reminder, ctx).await;
        }
    }
}

pub struct RelayCreatedReminder;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateReminderUseCase> for RelayCreatedReminder {
    async fn notify(&self, reminder: &Reminder, ctx: &TaskpulseContext) {
        let event = RealtimeEvent::NewReminder(ReminderDTO::new(reminder.clone()));
        emit(event, &reminder.owner_id, ctx).await;
    }
}

pub struct RelayUpdatedReminder;

#[async_trait::async_trait(?Send)]
impl Subscriber<UpdateReminderUseCase> for RelayUpdatedReminder {
    async fn notify(&self, reminder: &Reminder, ctx: &TaskpulseContext) {
        emit_reminder_updated(reminder, ctx).await;
    }
}

#[async_trait::async_trait(?Send)]
impl Subscriber<SnoozeReminderUseCase> for RelayUpdatedReminder {
    async fn notify(&self, reminder: &Reminder, ctx: &TaskpulseContext) {
        emit_reminder_updated(reminder, ctx).await;
    }
}

#[async_trait::async_trait(?Send)]
impl Subscriber<DismissReminderUseCase> for RelayUpdatedReminder {
    async fn notify(&self, reminder: &Reminder, ctx: &TaskpulseContext) {
        emit_reminder_updated(reminder, ctx).await;
    }
}

pub struct RelayDeletedReminder;

#[async_trait::async_trait(?Send)]
impl Subscriber<DeleteReminderUseCase> for RelayDeletedReminder {
    async fn notify(&self, reminder: &Reminder, ctx: &TaskpulseContext) {
        emit_reminder_deleted(reminder, ctx).await;
    }
}
