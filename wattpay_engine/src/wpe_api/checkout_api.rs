//! Drives a single bill checkout from order creation to reconciliation.
//!
//! The reconciliation performs three independent writes once the gateway reports success:
//! 1. record the payment,
//! 2. mark the bill as paid,
//! 3. notify the user.
//!
//! There is no transaction around the three writes, and a failure in one does not stop the others. In particular, if
//! the payment insert fails (for example because the transaction id was already recorded), the bill is still marked
//! as paid and the user is still notified. Failures are logged, and the session always ends in `Done` with a success
//! receipt.
use std::fmt::Debug;

use chrono::Utc;
use log::*;

use crate::{
    checkout_objects::{
        CheckoutOptions,
        CheckoutOutcome,
        CheckoutReceipt,
        CheckoutSession,
        CheckoutState,
        OrderHandle,
        OrderRequest,
    },
    db_types::{NewNotification, NewPayment, NotificationType},
    events::{EventProducers, PaymentReconciledEvent},
    helpers::{fallback_transaction_id, payment_success_message, PAYMENT_SUCCESS_TITLE},
    traits::BillingDatabase,
    wpe_api::errors::{CheckoutError, OrderIssuerError},
};

/// Mints a payment order at the gateway.
#[allow(async_fn_in_trait)]
pub trait OrderIssuer {
    /// Reports whether the issuer can take requests at all, for example whether gateway credentials are configured.
    /// This is checked before a request is looked at.
    fn ready(&self) -> Result<(), OrderIssuerError> {
        Ok(())
    }

    async fn issue_order(&self, request: OrderRequest) -> Result<OrderHandle, OrderIssuerError>;
}

/// The gateway's hosted checkout. Opening it blocks until the user pays, gives up, or the payment fails.
#[allow(async_fn_in_trait)]
pub trait HostedCheckout {
    async fn open(&self, options: CheckoutOptions) -> CheckoutOutcome;
}

pub struct CheckoutApi<B, I, H> {
    db: B,
    issuer: I,
    checkout: H,
    producers: EventProducers,
}

impl<B: Debug, I, H> Debug for CheckoutApi<B, I, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CheckoutApi ({:?})", self.db)
    }
}

impl<B, I, H> CheckoutApi<B, I, H>
where
    B: BillingDatabase,
    I: OrderIssuer,
    H: HostedCheckout,
{
    pub fn new(db: B, issuer: I, checkout: H, producers: EventProducers) -> Self {
        Self { db, issuer, checkout, producers }
    }

    pub fn db(&self) -> &B {
        &self.db
    }

    /// Runs the checkout for `session` and returns the receipt once the payment has been reconciled.
    ///
    /// On an issuer failure, a dismissed checkout, or a failed payment, the session goes back to `Idle` and nothing is
    /// written. The session can then be paid again. A session that is already `Done` is rejected.
    pub async fn pay(&self, session: &mut CheckoutSession) -> Result<CheckoutReceipt, CheckoutError> {
        session.transition(CheckoutState::OrderRequested)?;
        let request = OrderRequest::for_bill(&session.bill);
        let order = match self.issuer.issue_order(request).await {
            Ok(order) => order,
            Err(e) => {
                warn!("💳️ Could not create an order for bill {}. {e}", session.bill.bill_number);
                session.transition(CheckoutState::Idle)?;
                return Err(e.into());
            },
        };
        debug!("💳️ Order {} issued for bill {}. Opening checkout.", order.order_id, session.bill.bill_number);
        let options = CheckoutOptions::new(&order, session);
        session.transition(CheckoutState::CheckoutOpen(order))?;
        match self.checkout.open(options).await {
            CheckoutOutcome::Dismissed => {
                info!("💳️ Checkout for bill {} was dismissed by the user", session.bill.bill_number);
                session.transition(CheckoutState::Idle)?;
                Err(CheckoutError::Cancelled)
            },
            CheckoutOutcome::Failed { reason } => {
                info!("💳️ Payment for bill {} failed. {reason}", session.bill.bill_number);
                session.transition(CheckoutState::Idle)?;
                Err(CheckoutError::PaymentFailed(reason))
            },
            CheckoutOutcome::Succeeded { payment_id } => {
                let transaction_id = match payment_id.filter(|id| !id.trim().is_empty()) {
                    Some(id) => id,
                    None => {
                        let id = fallback_transaction_id(Utc::now());
                        warn!("💳️ The gateway did not supply a payment id. Using the local id {id} instead.");
                        id
                    },
                };
                session.transition(CheckoutState::Reconciling { transaction_id: transaction_id.clone() })?;
                let receipt = self.reconcile(session, transaction_id).await;
                session.transition(CheckoutState::Done(receipt.clone()))?;
                Ok(receipt)
            },
        }
    }

    async fn reconcile(&self, session: &CheckoutSession, transaction_id: String) -> CheckoutReceipt {
        let bill = &session.bill;
        let user_id = session.user.user_id.as_str();
        let new_payment =
            NewPayment::new(user_id, transaction_id.as_str(), bill.amount, session.method).for_bill(bill.id);
        let payment = match self.db.insert_payment(new_payment).await {
            Ok(p) => {
                info!("💳️ Payment {transaction_id} of {} recorded for bill {}", p.amount, bill.bill_number);
                Some(p)
            },
            Err(e) => {
                error!("💳️ Could not record payment {transaction_id} for bill {}. {e}", bill.bill_number);
                None
            },
        };
        let paid_bill = match self.db.mark_bill_paid(bill.id).await {
            Ok(b) => Some(b),
            Err(e) => {
                error!("💳️ Payment {transaction_id} went through but bill {} could not be marked paid. {e}", bill.id);
                None
            },
        };
        let message = payment_success_message(bill, &transaction_id);
        let notification = NewNotification::new(user_id, NotificationType::Success, PAYMENT_SUCCESS_TITLE, message.as_str());
        let notification = match self.db.insert_notification(notification).await {
            Ok(n) => Some(n),
            Err(e) => {
                warn!("💳️ Could not notify {user_id} about payment {transaction_id}. {e}");
                None
            },
        };
        let event = PaymentReconciledEvent {
            user_id: user_id.to_string(),
            bill_id: bill.id,
            transaction_id: transaction_id.clone(),
            payment,
            bill: paid_bill,
            notification,
        };
        if !event.is_complete() {
            warn!("💳️ Payment {transaction_id} was only partially reconciled. Manual follow-up is needed.");
        }
        self.producers.publish_payment_reconciled(event).await;
        CheckoutReceipt { transaction_id, bill_id: bill.id, amount: bill.amount, payment_method: session.method }
    }
}
