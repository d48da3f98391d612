use std::env;

use log::*;
use wattpay_common::Secret;

pub const DEFAULT_RAZORPAY_API_URL: &str = "https://api.razorpay.com/v1";

#[derive(Debug, Clone, Default)]
pub struct RazorpayConfig {
    /// The public key id. It is handed to browsers so that they can open the hosted checkout.
    pub key_id: String,
    pub key_secret: Secret<String>,
    /// Base URL of the REST API, without a trailing slash.
    pub api_url: String,
}

impl RazorpayConfig {
    pub fn new(key_id: &str, key_secret: &str) -> Self {
        Self {
            key_id: key_id.to_string(),
            key_secret: Secret::new(key_secret.to_string()),
            api_url: DEFAULT_RAZORPAY_API_URL.to_string(),
        }
    }

    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.trim_end_matches('/').to_string();
        self
    }

    /// Loads the gateway credentials from `RAZORPAY_KEY_ID` and `RAZORPAY_KEY_SECRET`.
    ///
    /// Returns `None` if either is missing or empty. Callers decide whether that is fatal; the order endpoint treats
    /// it as a per-request configuration error.
    pub fn from_env() -> Option<Self> {
        let key_id = env::var("RAZORPAY_KEY_ID").ok().filter(|s| !s.is_empty());
        let key_secret = env::var("RAZORPAY_KEY_SECRET").ok().filter(|s| !s.is_empty());
        let (key_id, key_secret) = match (key_id, key_secret) {
            (Some(id), Some(secret)) => (id, secret),
            _ => {
                warn!("🪛️ RAZORPAY_KEY_ID and/or RAZORPAY_KEY_SECRET are not set. Order creation will fail.");
                return None;
            },
        };
        let mut config = Self::new(&key_id, &key_secret);
        if let Ok(url) = env::var("RAZORPAY_API_URL") {
            info!("🪛️ Using {url} for the Razorpay API");
            config = config.with_api_url(&url);
        }
        Some(config)
    }
}
