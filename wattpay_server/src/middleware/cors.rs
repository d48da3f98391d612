//! CORS middleware for Actix Web.
//!
//! The portal calls the server straight from the browser, from whatever origin it happens to be hosted on. This
//! middleware
//! * answers every `OPTIONS` preflight request itself, with an empty `200 OK` and the CORS headers, without touching
//!   the routes,
//! * adds the same CORS headers to every other response, including error responses.
use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::{
        header::{HeaderName, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN},
        Method,
    },
    Error,
    HttpResponse,
};
use futures::future::LocalBoxFuture;
use log::trace;

pub const CORS_ALLOW_ORIGIN: &str = "*";
pub const CORS_ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

fn cors_headers() -> [(HeaderName, HeaderValue); 2] {
    [
        (ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static(CORS_ALLOW_ORIGIN)),
        (ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(CORS_ALLOW_HEADERS)),
    ]
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CorsMiddlewareFactory;

impl CorsMiddlewareFactory {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for CorsMiddlewareFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    type InitError = ();
    type Response = ServiceResponse<EitherBody<B>>;
    type Transform = CorsMiddlewareService<S>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CorsMiddlewareService { service: Rc::new(service) }))
    }
}

pub struct CorsMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for CorsMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;
    type Response = ServiceResponse<EitherBody<B>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        Box::pin(async move {
            if req.method() == Method::OPTIONS {
                trace!("💻️ Answering CORS preflight for {}", req.path());
                let mut response = HttpResponse::Ok();
                for header in cors_headers() {
                    response.insert_header(header);
                }
                return Ok(req.into_response(response.finish()).map_into_right_body());
            }
            let mut res = service.call(req).await?;
            let headers = res.headers_mut();
            for (name, value) in cors_headers() {
                headers.insert(name, value);
            }
            Ok(res.map_into_left_body())
        })
    }
}
