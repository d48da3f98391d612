//! # Storage contracts
//!
//! This module defines the interface contracts that storage *backends* must satisfy to be used by the WattPay engine.
//!
//! Every row in the store is owned by a user. The hosted deployment enforces that ownership with row-level access
//! policies; here it is expressed by taking the owning `user_id` as an argument on every user-facing query.
//!
//! * [`AccountManagement`] provides the user-scoped reads behind the portal pages (bills, payment history,
//!   notifications), and the single mutation a user may make to their own notifications.
//! * [`BillingDatabase`] defines the writes performed by the checkout and reminder flows, plus the cross-user query the
//!   reminder sweep needs. It runs with elevated (service) access.
mod account_management;
mod billing_database;

pub use account_management::{AccountApiError, AccountManagement};
pub use billing_database::{BillingDatabase, BillingDatabaseError};
