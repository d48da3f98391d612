use std::{env, time::Duration};

use log::*;
use razorpay_tools::RazorpayConfig;
use wattpay_common::parse_boolean_flag;
use wattpay_engine::DEFAULT_REMINDER_LOOKAHEAD_DAYS;

const DEFAULT_WPS_HOST: &str = "127.0.0.1";
const DEFAULT_WPS_PORT: u16 = 8460;
const DEFAULT_WPS_DATABASE_URL: &str = "sqlite://data/wattpay.db";
const DEFAULT_REMINDER_INTERVAL_HOURS: u64 = 24;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Apply any outstanding database migrations on start-up.
    pub run_migrations: bool,
    /// How often the scheduled reminder sweep runs. `None` disables the scheduled sweep; reminders are then only sent
    /// when `/send-bill-reminders` is called.
    pub reminder_interval: Option<Duration>,
    /// The reminder window: bills due between today and today + this many days are reminded.
    pub reminder_lookahead_days: u64,
    /// Razorpay credentials. A missing configuration is not fatal, but every `/create-order` call will fail with a
    /// configuration error.
    pub razorpay: Option<RazorpayConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_WPS_HOST.to_string(),
            port: DEFAULT_WPS_PORT,
            database_url: DEFAULT_WPS_DATABASE_URL.to_string(),
            run_migrations: true,
            reminder_interval: Some(Duration::from_secs(DEFAULT_REMINDER_INTERVAL_HOURS * 3600)),
            reminder_lookahead_days: DEFAULT_REMINDER_LOOKAHEAD_DAYS,
            razorpay: None,
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("WPS_HOST").ok().unwrap_or_else(|| DEFAULT_WPS_HOST.into());
        let port = env::var("WPS_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for WPS_PORT. {e} Using the default, {DEFAULT_WPS_PORT}, instead."
                    );
                    DEFAULT_WPS_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_WPS_PORT);
        let database_url = env::var("WPS_DATABASE_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ WPS_DATABASE_URL is not set. Using the default, {DEFAULT_WPS_DATABASE_URL}.");
            DEFAULT_WPS_DATABASE_URL.to_string()
        });
        let run_migrations = parse_boolean_flag(env::var("WPS_RUN_MIGRATIONS").ok(), true);
        let reminder_interval = configure_reminder_interval();
        let reminder_lookahead_days = env::var("WPS_REMINDER_LOOKAHEAD_DAYS")
            .map_err(|_| {
                info!(
                    "🪛️ WPS_REMINDER_LOOKAHEAD_DAYS is not set. Using the default value of \
                     {DEFAULT_REMINDER_LOOKAHEAD_DAYS} days."
                )
            })
            .and_then(|s| {
                s.parse::<u64>().map_err(|e| warn!("🪛️ Invalid configuration value for WPS_REMINDER_LOOKAHEAD_DAYS. {e}"))
            })
            .ok()
            .unwrap_or(DEFAULT_REMINDER_LOOKAHEAD_DAYS);
        let razorpay = RazorpayConfig::from_env();
        Self { host, port, database_url, run_migrations, reminder_interval, reminder_lookahead_days, razorpay }
    }
}

fn configure_reminder_interval() -> Option<Duration> {
    let hours = env::var("WPS_REMINDER_INTERVAL_HOURS")
        .map_err(|_| {
            info!(
                "🪛️ WPS_REMINDER_INTERVAL_HOURS is not set. Using the default value of \
                 {DEFAULT_REMINDER_INTERVAL_HOURS} hrs."
            )
        })
        .and_then(|s| {
            s.parse::<u64>().map_err(|e| warn!("🪛️ Invalid configuration value for WPS_REMINDER_INTERVAL_HOURS. {e}"))
        })
        .ok()
        .unwrap_or(DEFAULT_REMINDER_INTERVAL_HOURS);
    reminder_interval_from_hours(hours)
}

fn reminder_interval_from_hours(hours: u64) -> Option<Duration> {
    if hours == 0 {
        info!("🪛️ The scheduled reminder sweep is disabled. Reminders will only be sent on request.");
        return None;
    }
    let secs = hours.checked_mul(3600).unwrap_or_else(|| {
        warn!(
            "🪛️ WPS_REMINDER_INTERVAL_HOURS={hours} is too large. Using the default value of \
             {DEFAULT_REMINDER_INTERVAL_HOURS} hrs."
        );
        DEFAULT_REMINDER_INTERVAL_HOURS * 3600
    });
    Some(Duration::from_secs(secs))
}
