use serde::{Deserialize, Serialize};
use serde_json::Value;
use wattpay_common::Paise;

/// The body of a `POST /orders` request.
#[derive(Debug, Clone, Serialize)]
pub struct NewGatewayOrder {
    /// Amount in the currency's smallest unit.
    pub amount: Paise,
    pub currency: String,
    pub receipt: String,
    pub notes: Value,
}

/// An order, as returned by the gateway. Only the fields we use are kept; the rest are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: Paise,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub amount_paid: Option<Paise>,
    #[serde(default)]
    pub attempts: Option<u32>,
}
