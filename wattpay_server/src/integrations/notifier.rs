//! Event hooks that report on the portal's payment and reminder flows.
//!
//! The engine publishes an event after a bill payment has been reconciled and after a reminder sweep has stored its
//! notifications. These handlers write a summary of each event to the `wps::events` log target, so that operators
//! can follow reconciliation problems without trawling through the request logs.
use log::*;
use wattpay_engine::events::{EventHandlers, EventHooks, PaymentReconciledEvent, RemindersSentEvent};

pub const NOTIFIER_EVENT_BUFFER_SIZE: usize = 25;

const EVENT_LOG_TARGET: &str = "wps::events";

pub fn create_notifier_event_handlers() -> EventHandlers {
    let mut hooks = EventHooks::default();
    // --- On PaymentReconciled Handler ---
    hooks.on_payment_reconciled(|ev| {
        let PaymentReconciledEvent { user_id, bill_id, transaction_id, .. } = &ev;
        if ev.is_complete() {
            info!(target: EVENT_LOG_TARGET, "📬️ Bill {bill_id} for {user_id} reconciled with payment {transaction_id}");
        } else {
            warn!(
                target: EVENT_LOG_TARGET,
                "📬️ Bill {bill_id} for {user_id} was only partly reconciled with payment {transaction_id}. Payment \
                 recorded: {}. Bill marked paid: {}. User notified: {}",
                ev.payment.is_some(),
                ev.bill.is_some(),
                ev.notification.is_some()
            );
        }
        Box::pin(async {})
    });
    // --- On RemindersSent Handler ---
    hooks.on_reminders_sent(|ev| {
        let RemindersSentEvent { swept_on, notifications } = ev;
        info!(target: EVENT_LOG_TARGET, "📬️ {} reminder(s) stored by the sweep of {swept_on}", notifications.len());
        for n in &notifications {
            debug!(target: EVENT_LOG_TARGET, "📬️ Reminder #{} for {}: {}", n.id, n.user_id, n.message);
        }
        Box::pin(async {})
    });
    EventHandlers::new(NOTIFIER_EVENT_BUFFER_SIZE, hooks)
}
