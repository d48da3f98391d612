//! SQLite database module for the WattPay engine.
//!
//! The free functions in [`bills`], [`payments`] and [`notifications`] are the "low-level" interactions. Each accepts
//! a `&mut SqliteConnection`, so callers can pass a pooled connection or an open transaction (`&mut tx`) without any
//! other changes. [`SqliteDatabase`] stitches them together into the storage traits.
use std::{env, str::FromStr};

use log::info;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Error as SqlxError,
    SqlitePool,
};

pub mod bills;
pub mod notifications;
pub mod payments;
mod sqlite_impl;

pub use sqlite_impl::SqliteDatabase;

const SQLITE_DB_URL: &str = "sqlite://data/wattpay.db";

pub fn db_url() -> String {
    let result = env::var("WPS_DATABASE_URL").unwrap_or_else(|_| {
        info!("🗃️ WPS_DATABASE_URL is not set. Using the default.");
        SQLITE_DB_URL.to_string()
    });
    info!("🗃️ Using database URL: {result}");
    result
}

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqlxError> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect_with(options).await?;
    Ok(pool)
}
