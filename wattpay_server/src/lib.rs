//! # WattPay server
//! This crate hosts the HTTP server for the WattPay portal. It is responsible for:
//! * minting payment orders at Razorpay on behalf of the portal's checkout page,
//! * sweeping for bills that fall due soon and notifying their owners, on request and on a timer.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/create-order` (`POST`): Creates a Razorpay order for a bill payment.
//! * `/send-bill-reminders` (any method): Runs the due-date reminder sweep.
//!
//! Every route answers CORS preflight requests, and every response carries the CORS headers.
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod integrations;
pub mod middleware;
pub mod reminder_worker;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
