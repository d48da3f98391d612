use std::{future::Future, pin::Pin, sync::Arc};

use crate::events::{EventHandler, EventProducer, Handler, PaymentReconciledEvent, RemindersSentEvent};

#[derive(Default, Clone)]
pub struct EventProducers {
    pub payment_reconciled_producer: Vec<EventProducer<PaymentReconciledEvent>>,
    pub reminders_sent_producer: Vec<EventProducer<RemindersSentEvent>>,
}

impl EventProducers {
    pub async fn publish_payment_reconciled(&self, event: PaymentReconciledEvent) {
        for producer in &self.payment_reconciled_producer {
            producer.publish_event(event.clone()).await;
        }
    }

    pub async fn publish_reminders_sent(&self, event: RemindersSentEvent) {
        for producer in &self.reminders_sent_producer {
            producer.publish_event(event.clone()).await;
        }
    }
}

pub struct EventHandlers {
    pub on_payment_reconciled: Option<EventHandler<PaymentReconciledEvent>>,
    pub on_reminders_sent: Option<EventHandler<RemindersSentEvent>>,
}

impl EventHandlers {
    pub fn new(buffer_size: usize, hooks: EventHooks) -> Self {
        let on_payment_reconciled = hooks.on_payment_reconciled.map(|f| EventHandler::new(buffer_size, f));
        let on_reminders_sent = hooks.on_reminders_sent.map(|f| EventHandler::new(buffer_size, f));
        Self { on_payment_reconciled, on_reminders_sent }
    }

    pub fn producers(&self) -> EventProducers {
        let mut result = EventProducers::default();
        if let Some(handler) = &self.on_payment_reconciled {
            result.payment_reconciled_producer.push(handler.subscribe());
        }
        if let Some(handler) = &self.on_reminders_sent {
            result.reminders_sent_producer.push(handler.subscribe());
        }
        result
    }

    pub async fn start_handlers(self) {
        if let Some(handler) = self.on_payment_reconciled {
            tokio::spawn(async move {
                handler.start_handler().await;
            });
        }
        if let Some(handler) = self.on_reminders_sent {
            tokio::spawn(async move {
                handler.start_handler().await;
            });
        }
    }
}

#[derive(Default, Clone)]
pub struct EventHooks {
    pub on_payment_reconciled: Option<Handler<PaymentReconciledEvent>>,
    pub on_reminders_sent: Option<Handler<RemindersSentEvent>>,
}

impl EventHooks {
    pub fn on_payment_reconciled<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(PaymentReconciledEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        self.on_payment_reconciled = Some(Arc::new(f));
        self
    }

    pub fn on_reminders_sent<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(RemindersSentEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        self.on_reminders_sent = Some(Arc::new(f));
        self
    }
}
