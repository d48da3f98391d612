//! Storage backends for the WattPay engine.
//!
//! Backends implement the traits in [`crate::traits`]. SQLite is the only backend bundled with the engine.
#[cfg(feature = "sqlite")]
pub mod sqlite;
