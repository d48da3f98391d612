//! Razorpay tools
//!
//! A thin, typed wrapper around the parts of the Razorpay REST API that the WattPay server needs. At present that is
//! only order creation: every checkout session starts with a gateway order minted here.
//!
//! Credentials are read from the environment (see [`RazorpayConfig::from_env`]) and sent with HTTP Basic auth on every
//! request.
mod api;
mod config;
mod data_objects;
mod error;

pub use api::RazorpayApi;
pub use config::{RazorpayConfig, DEFAULT_RAZORPAY_API_URL};
pub use data_objects::{GatewayOrder, NewGatewayOrder};
pub use error::RazorpayApiError;
