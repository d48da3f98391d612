//! # WattPay engine public API
//!
//! The `wpe_api` module exposes the programmatic API of the WattPay engine. Each API is created by handing it a
//! storage backend that implements the traits it needs, so callers only pull in what they use.
//!
//! * [`checkout_api`] drives a checkout session for a single bill: it asks an [`OrderIssuer`] for a gateway order,
//!   opens the [`HostedCheckout`], and reconciles the bill, payment and notification tables once the gateway reports
//!   success.
//! * [`reminder_api`] sweeps for unpaid bills that fall due within the lookahead window and notifies their owners.
//! * [`accounts_api`] provides the read-only views of a user's bills, payments and notifications.
//!
//! # API usage
//!
//! ```rust,ignore
//! use wattpay_engine::{ReminderApi, SqliteDatabase};
//! use wattpay_engine::events::EventProducers;
//! let db = SqliteDatabase::new_with_url("sqlite://data/wattpay.db", 5).await?;
//! let api = ReminderApi::new(db, EventProducers::default());
//! let result = api.send_due_reminders().await?;
//! println!("{}", result.summary());
//! ```
//!
//! [`OrderIssuer`]: checkout_api::OrderIssuer
//! [`HostedCheckout`]: checkout_api::HostedCheckout

pub mod account_objects;
pub mod accounts_api;
pub mod checkout_api;
pub mod checkout_objects;
pub mod errors;
pub mod reminder_api;
