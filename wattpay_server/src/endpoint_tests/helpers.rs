use actix_web::{
    http::{header::HeaderMap, StatusCode},
    test,
    test::TestRequest,
    web::ServiceConfig,
    App,
};
use log::debug;

use crate::middleware::CorsMiddlewareFactory;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

/// Sends `req` to an app wrapped in the CORS middleware, the same way the server wraps it.
pub async fn send_request(req: TestRequest, configure: fn(&mut ServiceConfig)) -> TestResponse {
    let app = App::new().wrap(CorsMiddlewareFactory::new()).configure(configure);
    let service = test::init_service(app).await;
    debug!("Making request");
    let res = test::call_service(&service, req.to_request()).await;
    let status = res.status();
    let headers = res.headers().clone();
    let body = String::from_utf8_lossy(&test::read_body(res).await).into_owned();
    TestResponse { status, headers, body }
}

pub async fn post_request(path: &str, body: &str, configure: fn(&mut ServiceConfig)) -> TestResponse {
    let req = TestRequest::post()
        .uri(path)
        .insert_header(("content-type", "application/json"))
        .set_payload(body.to_string());
    send_request(req, configure).await
}

pub async fn get_request(path: &str, configure: fn(&mut ServiceConfig)) -> TestResponse {
    send_request(TestRequest::get().uri(path), configure).await
}

pub fn assert_cors_headers(headers: &HeaderMap) {
    assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
    assert_eq!(headers.get("access-control-allow-headers").unwrap(), "authorization, x-client-info, apikey, content-type");
}
