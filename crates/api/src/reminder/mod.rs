mod create_reminder;
pub mod delete_target_reminders;
mod delete_reminder;
pub mod deliver_due_reminders;
mod dismiss_reminder;
pub mod get_reminders;
mod snooze_reminder;
mod subscribers;
pub mod sync_reminder;
mod update_reminder;

use actix_web::web;
use create_reminder::create_reminder_controller;
use delete_reminder::delete_reminder_controller;
use dismiss_reminder::dismiss_reminder_controller;
use get_reminders::get_reminders_controller;
use snooze_reminder::snooze_reminder_controller;
use taskpulse_domain::{Reminder, ID};
use taskpulse_infra::TaskpulseContext;
use update_reminder::update_reminder_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/me/reminders", web::get().to(get_reminders_controller));
    cfg.route("/me/reminders", web::post().to(create_reminder_controller));
    cfg.route(
        "/me/reminders/{reminder_id}",
        web::put().to(update_reminder_controller),
    );
    cfg.route(
        "/me/reminders/{reminder_id}",
        web::delete().to(delete_reminder_controller),
    );
    cfg.route(
        "/me/reminders/{reminder_id}/snooze",
        web::post().to(snooze_reminder_controller),
    );
    cfg.route(
        "/me/reminders/{reminder_id}/dismiss",
        web::post().to(dismiss_reminder_controller),
    );
}

/// Finds a `Reminder` if it is owned by the given `User`
async fn find_owned_reminder(
    reminder_id: &ID,
    owner_id: &ID,
    ctx: &TaskpulseContext,
) -> anyhow::Result<Option<Reminder>> {
    let reminder = ctx.repos.reminders.find(reminder_id).await?;
    Ok(reminder.filter(|r| r.owner_id == *owner_id))
}
