use std::time::Duration;

use log::*;
use tokio::task::JoinHandle;
use wattpay_engine::{events::EventProducers, ReminderApi, SqliteDatabase};

/// Starts the scheduled reminder sweep. Do not await the returned JoinHandle, as it will run indefinitely.
///
/// The first sweep runs one full `interval` after start-up, so restarting the server does not send a fresh batch of
/// reminders.
pub fn start_reminder_worker(
    db: SqliteDatabase,
    producers: EventProducers,
    interval: Duration,
    lookahead_days: u64,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let start = tokio::time::Instant::now() + interval;
        let mut timer = tokio::time::interval_at(start, interval);
        let api = ReminderApi::new(db, producers).with_lookahead(lookahead_days);
        info!("⏰️ Reminder worker started. Sweeping every {} minutes", interval.as_secs() / 60);
        loop {
            timer.tick().await;
            info!("⏰️ Running scheduled reminder sweep");
            match api.send_due_reminders().await {
                Ok(result) => {
                    info!("⏰️ {}", result.summary());
                    if let Some(e) = result.insert_error() {
                        warn!("⏰️ Reminders were not stored. {e}");
                    }
                },
                Err(e) => {
                    error!("⏰️ Error running the reminder sweep: {e}");
                },
            }
        }
    })
}
