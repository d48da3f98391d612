use chrono::Days;
use cucumber::{given, then, when};
use wattpay_common::Paise;
use wattpay_engine::{
    checkout_objects::{CheckoutOutcome, CheckoutSession, CheckoutUser},
    db_types::{BillStatus, NewBill, NewPayment, NotificationType, PaymentMethod, PaymentStatus},
    events::EventProducers,
    test_utils::doubles::{ScriptedCheckout, ScriptedIssuer},
    traits::{AccountManagement, BillingDatabase},
    CheckoutApi,
    OrderIssuerError,
    ReminderApi,
};

use crate::cucumber::PortalWorld;

fn rupees(amount: f64) -> Paise {
    Paise::try_from(amount).expect("Not a valid rupee amount")
}

async fn seed_bill(world: &mut PortalWorld, user: String, number: String, month: String, amount: f64, days: i64) {
    let today = world.today();
    let due_date = if days >= 0 {
        today.checked_add_days(Days::new(days as u64))
    } else {
        today.checked_sub_days(Days::new(days.unsigned_abs()))
    }
    .expect("Due date out of range");
    let bill = NewBill::new(user, number.clone(), month, rupees(amount), due_date);
    let bill = world.db().insert_bill(bill).await.expect("Error inserting bill");
    world.bills.insert(number, bill);
}

#[given(expr = "user {string} has an unpaid bill {word} for {string} of {float} due in {int} day(s)")]
async fn unpaid_bill(world: &mut PortalWorld, user: String, number: String, month: String, amount: f64, days: i64) {
    seed_bill(world, user, number, month, amount, days).await;
}

#[given(expr = "user {string} has a paid bill {word} for {string} of {float} due in {int} day(s)")]
async fn paid_bill(world: &mut PortalWorld, user: String, number: String, month: String, amount: f64, days: i64) {
    seed_bill(world, user, number.clone(), month, amount, days).await;
    let id = world.bill(&number).id;
    let bill = world.db().mark_bill_paid(id).await.expect("Error marking bill paid");
    world.bills.insert(number, bill);
}

#[given(expr = "payment {word} has already been recorded for user {string}")]
async fn existing_payment(world: &mut PortalWorld, txid: String, user: String) {
    let payment = NewPayment::new(user, txid, Paise::from_rupees(10), PaymentMethod::Upi);
    world.db().insert_payment(payment).await.expect("Error inserting payment");
}

#[given("the order issuer is unavailable")]
async fn issuer_unavailable(world: &mut PortalWorld) {
    world.issuer_failure = Some(OrderIssuerError::Unavailable("connection refused".into()));
}

//--------------------------------------        Sweeps         ---------------------------------------------------------

#[when("the reminder sweep runs")]
async fn run_sweep(world: &mut PortalWorld) {
    let api = ReminderApi::new(world.db().clone(), EventProducers::default());
    let result = api.send_due_reminders_on(world.today()).await.expect("Reminder sweep failed");
    world.reminder_results.push(result);
}

#[then(expr = "the sweep reports {string} with count {int}")]
async fn sweep_result(world: &mut PortalWorld, message: String, count: usize) {
    let result = world.reminder_results.last().expect("No sweep has run");
    assert_eq!(result.summary(), message);
    assert_eq!(result.count(), count);
    assert_eq!(result.insert_error(), None);
}

//--------------------------------------       Checkout        ---------------------------------------------------------

async fn checkout(world: &mut PortalWorld, user: String, number: String, method: String, outcome: CheckoutOutcome) {
    let method = method.parse::<PaymentMethod>().expect("Unknown payment method");
    let bill = world.bill(&number).clone();
    let issuer = match world.issuer_failure.clone() {
        Some(e) => ScriptedIssuer::failing(e),
        None => ScriptedIssuer::default(),
    };
    let api = CheckoutApi::new(world.db().clone(), issuer, ScriptedCheckout::new(outcome), EventProducers::default());
    let user = CheckoutUser::new(user).with_email("customer@example.in");
    let mut session = CheckoutSession::new(user, bill, method);
    world.checkout_result = Some(api.pay(&mut session).await);
}

#[when(expr = "{string} pays bill {word} by {word} and the gateway confirms payment {word}")]
async fn pay_confirmed(world: &mut PortalWorld, user: String, number: String, method: String, txid: String) {
    let outcome = CheckoutOutcome::Succeeded { payment_id: Some(txid) };
    checkout(world, user, number, method, outcome).await;
}

#[when(expr = "{string} pays bill {word} by {word} and the gateway confirms without a payment id")]
async fn pay_confirmed_without_id(world: &mut PortalWorld, user: String, number: String, method: String) {
    checkout(world, user, number, method, CheckoutOutcome::Succeeded { payment_id: None }).await;
}

#[when(expr = "{string} pays bill {word} by {word} and dismisses the checkout")]
async fn pay_dismissed(world: &mut PortalWorld, user: String, number: String, method: String) {
    checkout(world, user, number, method, CheckoutOutcome::Dismissed).await;
}

#[when(expr = "{string} pays bill {word} by {word} and the gateway reports failure {string}")]
async fn pay_failed(world: &mut PortalWorld, user: String, number: String, method: String, reason: String) {
    checkout(world, user, number, method, CheckoutOutcome::Failed { reason }).await;
}

#[then(expr = "the checkout succeeds with transaction id {word}")]
async fn checkout_succeeded(world: &mut PortalWorld, txid: String) {
    match world.checkout_result.as_ref().expect("No checkout has run") {
        Ok(receipt) => assert_eq!(receipt.transaction_id, txid),
        Err(e) => panic!("Checkout failed: {e}"),
    }
}

#[then("the checkout succeeds with a locally generated transaction id")]
async fn checkout_succeeded_locally(world: &mut PortalWorld) {
    let receipt = match world.checkout_result.as_ref().expect("No checkout has run") {
        Ok(receipt) => receipt,
        Err(e) => panic!("Checkout failed: {e}"),
    };
    assert!(receipt.transaction_id.starts_with("TXN-"), "Unexpected id {}", receipt.transaction_id);
    assert_eq!(receipt.transaction_id.len(), 12);
    let payment = world.db().fetch_payment_by_transaction_id(&receipt.transaction_id).await.unwrap();
    assert!(payment.is_some(), "The local transaction id was not recorded");
}

#[then(expr = "the checkout fails with {string}")]
async fn checkout_failed(world: &mut PortalWorld, message: String) {
    match world.checkout_result.as_ref().expect("No checkout has run") {
        Ok(receipt) => panic!("Checkout unexpectedly succeeded: {receipt:?}"),
        Err(e) => assert_eq!(e.to_string(), message),
    }
}

#[then(expr = "payment {word} is recorded for bill {word} with amount {float} and status {word}")]
async fn payment_recorded(world: &mut PortalWorld, txid: String, number: String, amount: f64, status: String) {
    let bill_id = world.bill(&number).id;
    let payment = world
        .db()
        .fetch_payment_by_transaction_id(&txid)
        .await
        .expect("Error fetching payment")
        .expect("Payment was not recorded");
    assert_eq!(payment.bill_id, Some(bill_id));
    assert_eq!(payment.amount, rupees(amount));
    assert_eq!(payment.status, status.parse::<PaymentStatus>().expect("Unknown payment status"));
}

#[then(expr = "bill {word} is {word}")]
async fn bill_status(world: &mut PortalWorld, number: String, status: String) {
    let id = world.bill(&number).id;
    let bill = world.db().fetch_bill(id).await.expect("Error fetching bill").expect("Bill disappeared");
    assert_eq!(bill.status, status.parse::<BillStatus>().expect("Unknown bill status"));
}

//--------------------------------------       Accounts        ---------------------------------------------------------

#[then(expr = "user {string} has {int} payment(s)")]
async fn payment_count(world: &mut PortalWorld, user: String, count: usize) {
    let payments = world.db().fetch_payments_for_user(&user).await.expect("Error fetching payments");
    assert_eq!(payments.len(), count);
}

#[then(expr = "user {string} has {int} notification(s)")]
async fn notification_count(world: &mut PortalWorld, user: String, count: usize) {
    let notifications = world.db().fetch_notifications_for_user(&user).await.expect("Error fetching notifications");
    assert_eq!(notifications.len(), count);
}

#[then(expr = "user {string} has {int} {word} notification(s)")]
async fn typed_notification_count(world: &mut PortalWorld, user: String, count: usize, kind: String) {
    let kind = kind.parse::<NotificationType>().expect("Unknown notification type");
    let notifications = world.db().fetch_notifications_for_user(&user).await.expect("Error fetching notifications");
    let matching = notifications.iter().filter(|n| n.notification_type == kind).count();
    assert_eq!(matching, count);
}

#[then(expr = "the latest notification for {string} is titled {string}")]
async fn latest_notification_title(world: &mut PortalWorld, user: String, title: String) {
    let notifications = world.db().fetch_notifications_for_user(&user).await.expect("Error fetching notifications");
    let latest = notifications.first().expect("No notifications");
    assert_eq!(latest.title, title);
}

#[then(expr = "the latest notification for {string} mentions {string}")]
async fn latest_notification_mentions(world: &mut PortalWorld, user: String, text: String) {
    let notifications = world.db().fetch_notifications_for_user(&user).await.expect("Error fetching notifications");
    let latest = notifications.first().expect("No notifications");
    assert!(latest.message.contains(&text), "'{}' does not mention '{text}'", latest.message);
}
