use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::*;
use wattpay_engine::{events::EventProducers, OrderIssuer, ReminderApi, SqliteDatabase};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::{create_notifier_event_handlers, RazorpayOrderIssuer},
    middleware::CorsMiddlewareFactory,
    reminder_worker::start_reminder_worker,
    routes::{health, CreateOrderRoute, SendBillRemindersRoute},
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    if config.run_migrations {
        db.migrate().await.map_err(|e| ServerError::InitializeError(format!("Could not run migrations. {e}")))?;
        info!("🗃️ Database migrations are up to date");
    }
    let handlers = create_notifier_event_handlers();
    let producers = handlers.producers();
    handlers.start_handlers().await;
    match config.reminder_interval {
        Some(interval) => {
            let _worker =
                start_reminder_worker(db.clone(), producers.clone(), interval, config.reminder_lookahead_days);
        },
        None => info!("⏰️ No reminder interval is configured. The scheduled reminder sweep will not run."),
    }
    let srv = create_server_instance(config, db, producers)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    producers: EventProducers,
) -> Result<Server, ServerError> {
    let issuer = RazorpayOrderIssuer::new(config.razorpay.clone())?;
    if issuer.ready().is_err() {
        warn!("🪛️ Razorpay credentials are not configured. Every /create-order request will fail until they are set.");
    }
    let lookahead_days = config.reminder_lookahead_days;
    let srv = HttpServer::new(move || {
        let reminder_api = ReminderApi::new(db.clone(), producers.clone()).with_lookahead(lookahead_days);
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %r").log_target("wps::access_log"))
            .wrap(CorsMiddlewareFactory::new())
            .app_data(web::Data::new(issuer.clone()))
            .app_data(web::Data::new(reminder_api))
            .service(health)
            .service(CreateOrderRoute::<RazorpayOrderIssuer>::new())
            .service(SendBillRemindersRoute::<SqliteDatabase>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
