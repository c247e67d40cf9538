use crate::{reminder::deliver_due_reminders::DeliverDueRemindersUseCase, shared::usecase::execute};
use actix_web::rt::time::{interval, sleep_until, Instant};
use std::time::Duration;
use taskpulse_infra::TaskpulseContext;
use tracing::{error, info};

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

/// Delivers due reminders at the start of every minute
pub fn start_deliver_reminders_job(ctx: TaskpulseContext) {
    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        let start = Instant::now() + Duration::from_secs(secs_to_next_run as u64);

        sleep_until(start).await;
        let mut minutely_interval = interval(Duration::from_secs(60));
        loop {
            minutely_interval.tick().await;
            let context = ctx.clone();
            actix_web::rt::spawn(deliver_reminders(context));
        }
    });
}

async fn deliver_reminders(ctx: TaskpulseContext) {
    match execute(DeliverDueRemindersUseCase {}, &ctx).await {
        Ok(report) if report.delivered > 0 || report.woken > 0 => info!(
            "Delivered {} reminders and woke {} snoozed reminders",
            report.delivered, report.woken
        ),
        Ok(_) => (),
        Err(e) => error!("Unable to deliver due reminders. Error: {:?}", e),
    }
}
