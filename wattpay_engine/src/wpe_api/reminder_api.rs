//! The due-date reminder sweep.
//!
//! Each sweep looks for unpaid bills whose due date falls between today and `today + lookahead` (both inclusive), and
//! stores one warning notification per bill in a single batch. Sweeps do not remember what they have sent before, so
//! two sweeps on the same day send two sets of reminders.
use std::fmt::Debug;

use chrono::{Days, NaiveDate, Utc};
use log::*;
use serde::Serialize;

use crate::{
    db_types::{NewNotification, NotificationType},
    events::{EventProducers, RemindersSentEvent},
    helpers::reminder_message,
    traits::BillingDatabase,
    wpe_api::errors::ReminderError,
};

pub const DEFAULT_REMINDER_LOOKAHEAD_DAYS: u64 = 3;
pub const REMINDER_TITLE: &str = "Bill Due Reminder";

/// The result of one sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ReminderResult {
    /// No unpaid bills were due in the window. Nothing was written.
    NoDueBills,
    /// A reminder was built for each of `count` bills and the batch insert was attempted. If the insert failed,
    /// `error` holds the reason and none of the reminders were stored.
    Sent { count: usize, error: Option<String> },
}

impl ReminderResult {
    pub fn count(&self) -> usize {
        match self {
            ReminderResult::NoDueBills => 0,
            ReminderResult::Sent { count, .. } => *count,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            ReminderResult::NoDueBills => "No due bills found".to_string(),
            ReminderResult::Sent { count, .. } => format!("Sent {count} reminder(s)"),
        }
    }

    pub fn insert_error(&self) -> Option<&str> {
        match self {
            ReminderResult::NoDueBills => None,
            ReminderResult::Sent { error, .. } => error.as_deref(),
        }
    }
}

pub struct ReminderApi<B> {
    db: B,
    producers: EventProducers,
    lookahead_days: u64,
}

impl<B: Debug> Debug for ReminderApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReminderApi ({:?}, {} days)", self.db, self.lookahead_days)
    }
}

impl<B> ReminderApi<B>
where B: BillingDatabase
{
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, producers, lookahead_days: DEFAULT_REMINDER_LOOKAHEAD_DAYS }
    }

    pub fn with_lookahead(mut self, days: u64) -> Self {
        self.lookahead_days = days;
        self
    }

    pub fn lookahead_days(&self) -> u64 {
        self.lookahead_days
    }

    /// Runs a sweep using today's date in UTC.
    pub async fn send_due_reminders(&self) -> Result<ReminderResult, ReminderError> {
        let today = Utc::now().date_naive();
        self.send_due_reminders_on(today).await
    }

    /// Runs a sweep as though today were `today`.
    ///
    /// Failing to fetch the due bills is an error. Failing to store the reminders is not: the failure is reported in
    /// the result instead.
    pub async fn send_due_reminders_on(&self, today: NaiveDate) -> Result<ReminderResult, ReminderError> {
        let until = today.checked_add_days(Days::new(self.lookahead_days)).unwrap_or(NaiveDate::MAX);
        let bills = self.db.fetch_unpaid_bills_due_between(today, until).await?;
        if bills.is_empty() {
            info!("⏰️ No unpaid bills are due between {today} and {until}");
            return Ok(ReminderResult::NoDueBills);
        }
        let notifications = bills
            .iter()
            .map(|bill| {
                NewNotification::new(
                    bill.user_id.clone(),
                    NotificationType::Warning,
                    REMINDER_TITLE.to_string(),
                    reminder_message(bill),
                )
            })
            .collect::<Vec<_>>();
        let count = notifications.len();
        let error = match self.db.insert_notifications(notifications).await {
            Ok(inserted) => {
                info!("⏰️ Sent {count} bill reminder(s) for bills due by {until}");
                self.producers.publish_reminders_sent(RemindersSentEvent::new(today, inserted)).await;
                None
            },
            Err(e) => {
                error!("⏰️ Could not store {count} bill reminder(s). {e}");
                Some(e.to_string())
            },
        };
        Ok(ReminderResult::Sent { count, error })
    }
}
