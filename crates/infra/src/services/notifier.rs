use taskpulse_domain::Reminder;
use tracing::info;

/// Outgoing email and push notifications for delivered reminders
#[async_trait::async_trait]
pub trait INotificationSender: Send + Sync {
    async fn send_email(&self, to: &str, reminder: &Reminder) -> anyhow::Result<()>;
    async fn send_push(&self, push_token: &str, reminder: &Reminder) -> anyhow::Result<()>;
}

/// Logs the notifications instead of handing them to a provider
pub struct TracingNotificationSender;

#[async_trait::async_trait]
impl INotificationSender for TracingNotificationSender {
    async fn send_email(&self, to: &str, reminder: &Reminder) -> anyhow::Result<()> {
        info!(
            reminder_id = %reminder.id,
            "Sending reminder email to {}: {}",
            to,
            reminder.message
        );
        Ok(())
    }

    async fn send_push(&self, push_token: &str, reminder: &Reminder) -> anyhow::Result<()> {
        info!(
            reminder_id = %reminder.id,
            "Sending reminder push notification to {}: {}",
            push_token,
            reminder.message
        );
        Ok(())
    }
}
