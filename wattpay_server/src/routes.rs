//! Request handler definitions
//!
//! Define each route and its handler here. Handlers that are more than a few lines long belong in their own module.
//!
//! Handlers must not block the worker thread. Each worker processes its requests one after another, so any I/O (the
//! database, the gateway) has to be awaited, never waited on synchronously.
use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use wattpay_engine::{checkout_objects::OrderRequest, traits::BillingDatabase, OrderIssuer, ReminderApi};

use crate::{
    data_objects::{CreateOrderRequest, ReminderResponse},
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => Any $path:literal impl $($bounds:ty),+) => {
        $crate::route!(@define $name, $path, [], $($bounds),+);
    };

    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        $crate::route!(@define $name, $path, [actix_web::guard::$method()], $($bounds),+);
    };

    (@define $name:ident, $path:literal, [$($guard:expr)?], $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    $(.guard($guard))?
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(create_order => Post "/create-order" impl OrderIssuer);
/// Mints a gateway order for a bill payment.
///
/// The body is `{"amount": 132.50, "currency": "INR", "receipt": "...", "notes": {...}}`, where only `amount` is
/// required. The response is `{"order_id", "amount", "currency", "key_id"}`, with `amount` in paise.
///
/// The issuer's configuration is checked before the body is read, so a server without gateway credentials answers
/// every request with a 500, whatever the body.
pub async fn create_order<I>(body: web::Bytes, issuer: web::Data<I>) -> Result<HttpResponse, ServerError>
where I: OrderIssuer {
    trace!("💻️ Received create-order request");
    issuer.ready()?;
    let request = serde_json::from_slice::<CreateOrderRequest>(&body).map_err(|e| {
        debug!("💻️ Could not deserialize create-order request. {e}");
        ServerError::InvalidRequestBody(e.to_string())
    })?;
    let request = OrderRequest::try_from(request)?;
    let order = issuer.issue_order(request).await?;
    debug!("💻️ Order {} issued for {}", order.order_id, order.amount);
    Ok(HttpResponse::Ok().json(order))
}

//----------------------------------------------   Reminders  ----------------------------------------------------
route!(send_bill_reminders => Any "/send-bill-reminders" impl BillingDatabase);
/// Runs the due-date reminder sweep. Any method is accepted and the body is ignored.
pub async fn send_bill_reminders<B>(api: web::Data<ReminderApi<B>>) -> Result<HttpResponse, ServerError>
where B: BillingDatabase {
    trace!("💻️ Received send-bill-reminders request");
    let result = api.send_due_reminders().await?;
    info!("💻️ {}", result.summary());
    Ok(HttpResponse::Ok().json(ReminderResponse::from(result)))
}
