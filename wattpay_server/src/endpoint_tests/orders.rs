use actix_web::{http::StatusCode, test::TestRequest, web, web::ServiceConfig};
use razorpay_tools::RazorpayConfig;
use wattpay_common::Paise;
use wattpay_engine::{checkout_objects::OrderHandle, OrderIssuerError};

use super::helpers::{assert_cors_headers, post_request, send_request};
use crate::{
    endpoint_tests::mocks::MockIssuer,
    integrations::RazorpayOrderIssuer,
    routes::CreateOrderRoute,
};

#[actix_web::test]
async fn create_order() {
    let _ = env_logger::try_init().ok();
    let res = post_request("/create-order", r#"{"amount": 132.50, "receipt": "INV-2024-06"}"#, configure).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, r#"{"order_id":"order_Nx1","amount":13250,"currency":"INR","key_id":"rzp_test_key"}"#);
    assert_cors_headers(&res.headers);
}

#[actix_web::test]
async fn missing_amount_is_rejected() {
    let _ = env_logger::try_init().ok();
    let res = post_request("/create-order", r#"{"currency": "INR"}"#, configure_untouched).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body, r#"{"error":"Invalid amount"}"#);
    assert_cors_headers(&res.headers);
}

#[actix_web::test]
async fn non_positive_amounts_are_rejected() {
    let _ = env_logger::try_init().ok();
    for body in [r#"{"amount": 0}"#, r#"{"amount": -5}"#, r#"{"amount": -0.001}"#] {
        let res = post_request("/create-order", body, configure_offline).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(res.body, r#"{"error":"Invalid amount"}"#);
    }
}

#[actix_web::test]
async fn garbage_body_is_rejected() {
    let _ = env_logger::try_init().ok();
    let res = post_request("/create-order", "amount=132.50", configure_untouched).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body.starts_with(r#"{"error":"Could not read request body: "#), "{}", res.body);
    let res = post_request("/create-order", "", configure_untouched).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn missing_credentials() {
    let _ = env_logger::try_init().ok();
    let res = post_request("/create-order", r#"{"amount": 132.50}"#, configure_unconfigured).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body, r#"{"error":"Razorpay credentials not configured"}"#);
    // Credentials are checked before the body is looked at
    let res = post_request("/create-order", "{}", configure_unconfigured).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body, r#"{"error":"Razorpay credentials not configured"}"#);
    assert_cors_headers(&res.headers);
}

#[actix_web::test]
async fn gateway_errors_are_passed_on() {
    let _ = env_logger::try_init().ok();
    let res = post_request("/create-order", r#"{"amount": 132.50}"#, configure_gateway_error).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body, r#"{"error":"Razorpay API error [400]: The amount must be at least INR 1.00"}"#);
}

#[actix_web::test]
async fn preflight_is_answered_without_calling_the_handler() {
    let _ = env_logger::try_init().ok();
    let req = TestRequest::default().method(actix_web::http::Method::OPTIONS).uri("/create-order");
    let res = send_request(req, configure_untouched).await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.is_empty());
    assert_cors_headers(&res.headers);
}

#[actix_web::test]
async fn only_post_is_routed() {
    let _ = env_logger::try_init().ok();
    let res = send_request(TestRequest::get().uri("/create-order"), configure_untouched).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_cors_headers(&res.headers);
}

fn configure(cfg: &mut ServiceConfig) {
    let mut issuer = MockIssuer::new();
    issuer.expect_ready().returning(|| Ok(()));
    issuer
        .expect_issue_order()
        .withf(|req| {
            req.amount == 132.5 &&
                req.currency == "INR" &&
                req.receipt.as_deref() == Some("INV-2024-06") &&
                req.notes == serde_json::json!({})
        })
        .times(1)
        .returning(|_| {
            Ok(OrderHandle {
                order_id: "order_Nx1".into(),
                amount: Paise::from(13_250),
                currency: "INR".into(),
                key_id: "rzp_test_key".into(),
            })
        });
    cfg.service(CreateOrderRoute::<MockIssuer>::new()).app_data(web::Data::new(issuer));
}

// The gateway must never be reached
fn configure_untouched(cfg: &mut ServiceConfig) {
    let mut issuer = MockIssuer::new();
    issuer.expect_ready().returning(|| Ok(()));
    issuer.expect_issue_order().never();
    cfg.service(CreateOrderRoute::<MockIssuer>::new()).app_data(web::Data::new(issuer));
}

fn configure_gateway_error(cfg: &mut ServiceConfig) {
    let mut issuer = MockIssuer::new();
    issuer.expect_ready().returning(|| Ok(()));
    issuer.expect_issue_order().returning(|_| {
        Err(OrderIssuerError::GatewayError {
            status: 400,
            message: "The amount must be at least INR 1.00".into(),
        })
    });
    cfg.service(CreateOrderRoute::<MockIssuer>::new()).app_data(web::Data::new(issuer));
}

fn configure_unconfigured(cfg: &mut ServiceConfig) {
    let issuer = RazorpayOrderIssuer::new(None).unwrap();
    cfg.service(CreateOrderRoute::<RazorpayOrderIssuer>::new()).app_data(web::Data::new(issuer));
}

// Credentials are set, but nothing is listening at the gateway address
fn configure_offline(cfg: &mut ServiceConfig) {
    let config = RazorpayConfig::new("rzp_test_key", "rzp_test_secret").with_api_url("http://127.0.0.1:9");
    let issuer = RazorpayOrderIssuer::new(Some(config)).unwrap();
    cfg.service(CreateOrderRoute::<RazorpayOrderIssuer>::new()).app_data(web::Data::new(issuer));
}
