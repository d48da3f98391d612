use actix_web::{http::StatusCode, test::TestRequest, web, web::ServiceConfig};
use chrono::{Days, NaiveDate, Utc};
use wattpay_common::Paise;
use wattpay_engine::{
    db_types::{Bill, BillStatus, Notification, NotificationType},
    events::EventProducers,
    traits::BillingDatabaseError,
    ReminderApi,
};

use super::helpers::{assert_cors_headers, get_request, post_request, send_request};
use crate::{endpoint_tests::mocks::MockStore, routes::SendBillRemindersRoute};

#[actix_web::test]
async fn no_due_bills() {
    let _ = env_logger::try_init().ok();
    let res = post_request("/send-bill-reminders", "", configure_no_bills).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, r#"{"message":"No due bills found","count":0}"#);
    assert_cors_headers(&res.headers);
}

#[actix_web::test]
async fn reminders_are_sent() {
    let _ = env_logger::try_init().ok();
    let res = post_request("/send-bill-reminders", "{}", configure).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, r#"{"message":"Sent 2 reminder(s)","count":2,"error":null}"#);
}

#[actix_web::test]
async fn any_method_runs_the_sweep() {
    let _ = env_logger::try_init().ok();
    let res = get_request("/send-bill-reminders", configure).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, r#"{"message":"Sent 2 reminder(s)","count":2,"error":null}"#);
    let res = send_request(TestRequest::put().uri("/send-bill-reminders"), configure).await;
    assert_eq!(res.status, StatusCode::OK);
}

#[actix_web::test]
async fn insert_failure_is_reported_in_the_body() {
    let _ = env_logger::try_init().ok();
    let res = post_request("/send-bill-reminders", "", configure_insert_fails).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.body,
        r#"{"message":"Sent 2 reminder(s)","count":2,"error":"We have an internal database engine (configuration/uptime etc.) error: disk full"}"#
    );
}

#[actix_web::test]
async fn fetch_failure_is_a_server_error() {
    let _ = env_logger::try_init().ok();
    let res = post_request("/send-bill-reminders", "", configure_fetch_fails).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.body.starts_with(r#"{"error":"An error occurred on the backend of the server. Could not fetch due bills."#));
    assert_cors_headers(&res.headers);
}

fn due_bill(id: i64, user_id: &str, days_ahead: u64) -> Bill {
    let today = Utc::now().date_naive();
    Bill {
        id,
        user_id: user_id.into(),
        bill_number: format!("INV-{id:04}"),
        billing_month: "June 2024".into(),
        amount: Paise::from(13_250),
        units_consumed: 1100.0,
        due_date: today.checked_add_days(Days::new(days_ahead)).unwrap(),
        status: BillStatus::Unpaid,
        created_at: Utc::now(),
    }
}

fn reminder(id: i64, user_id: &str, message: &str) -> Notification {
    Notification {
        id,
        user_id: user_id.into(),
        notification_type: NotificationType::Warning,
        title: "Bill Due Reminder".into(),
        message: message.into(),
        read: false,
        created_at: Utc::now(),
    }
}

fn register(cfg: &mut ServiceConfig, store: MockStore) {
    let api = ReminderApi::new(store, EventProducers::default());
    cfg.service(SendBillRemindersRoute::<MockStore>::new()).app_data(web::Data::new(api));
}

fn configure(cfg: &mut ServiceConfig) {
    let mut store = MockStore::new();
    store
        .expect_fetch_unpaid_bills_due_between()
        .withf(|from: &NaiveDate, until: &NaiveDate| until.signed_duration_since(*from).num_days() == 3)
        .returning(|_, _| Ok(vec![due_bill(1, "alice", 1), due_bill(2, "bob", 3)]));
    store.expect_insert_notifications().times(1).returning(|notifications| {
        assert_eq!(notifications.len(), 2);
        assert!(notifications.iter().all(|n| n.notification_type == NotificationType::Warning));
        Ok(notifications
            .into_iter()
            .zip(1..)
            .map(|(n, id)| reminder(id, &n.user_id, &n.message))
            .collect())
    });
    register(cfg, store);
}

fn configure_no_bills(cfg: &mut ServiceConfig) {
    let mut store = MockStore::new();
    store.expect_fetch_unpaid_bills_due_between().returning(|_, _| Ok(vec![]));
    store.expect_insert_notifications().never();
    register(cfg, store);
}

fn configure_insert_fails(cfg: &mut ServiceConfig) {
    let mut store = MockStore::new();
    store
        .expect_fetch_unpaid_bills_due_between()
        .returning(|_, _| Ok(vec![due_bill(1, "alice", 0), due_bill(2, "alice", 2)]));
    store
        .expect_insert_notifications()
        .returning(|_| Err(BillingDatabaseError::DatabaseError("disk full".into())));
    register(cfg, store);
}

fn configure_fetch_fails(cfg: &mut ServiceConfig) {
    let mut store = MockStore::new();
    store
        .expect_fetch_unpaid_bills_due_between()
        .returning(|_, _| Err(BillingDatabaseError::DatabaseError("database is locked".into())));
    store.expect_insert_notifications().never();
    register(cfg, store);
}
