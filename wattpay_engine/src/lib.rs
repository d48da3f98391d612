//! WattPay Engine
//!
//! The WattPay engine holds the business logic of the electricity portal's payment flow. It is backend-agnostic: the
//! storage layer is described by traits, and SQLite is the bundled implementation.
//!
//! The library is divided into the following sections:
//! 1. Storage ([`mod@db`]). You should never need to touch the database directly; use the APIs instead. The data types
//!    stored in the database live in [`db_types`] and are public.
//! 2. The engine's public API ([`mod@wpe_api`]):
//!    * [`CheckoutApi`] drives a single bill checkout session and reconciles local state once the gateway reports a
//!      successful payment.
//!    * [`ReminderApi`] sweeps for unpaid bills that are due soon and notifies their owners.
//!    * [`AccountApi`] provides the user-scoped views of bills, payments and notifications.
//!
//! The engine also publishes events (see [`events`]) after a payment has been reconciled and after reminders have been
//! sent, so that other components can hook into these flows.
mod db;

pub mod db_types;
pub mod events;
pub mod helpers;
pub mod traits;
mod wpe_api;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

#[cfg(feature = "sqlite")]
pub use db::sqlite::SqliteDatabase;
pub use wpe_api::{
    account_objects,
    accounts_api::AccountApi,
    checkout_api::{CheckoutApi, HostedCheckout, OrderIssuer},
    checkout_objects,
    errors::{CheckoutError, OrderIssuerError, ReminderError},
    reminder_api::{ReminderApi, ReminderResult, DEFAULT_REMINDER_LOOKAHEAD_DAYS, REMINDER_TITLE},
};
