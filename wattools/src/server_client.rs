use anyhow::{anyhow, Result};
use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    Method,
};
use serde::de::DeserializeOwned;
use url::Url;
use wattpay_engine::{
    checkout_objects::{OrderHandle, OrderRequest},
    OrderIssuer,
    OrderIssuerError,
};
use wattpay_server::data_objects::{CreateOrderRequest, ReminderResponse};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8460";

/// A thin client for the WattPay server's public routes.
#[derive(Clone)]
pub struct PortalServerClient {
    client: Client,
    server: Url,
}

impl PortalServerClient {
    pub fn new(server: Url) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .user_agent("WattPay Server Client")
            .default_headers(headers)
            .build()
            .map_err(|e| anyhow!("Failed to create reqwest client. {e}"))?;
        Ok(Self { client, server })
    }

    pub fn server(&self) -> &str {
        self.server.as_str()
    }

    pub fn url(&self, path: &str) -> Result<Url> {
        self.server.join(path).map_err(|e| anyhow!("Failed to join URL: {}", e))
    }

    pub async fn health(&self) -> Result<String> {
        let url = self.url("/health")?;
        let res = self.client.get(url).send().await?;
        Ok(res.text().await?)
    }

    pub async fn create_order(&self, order: &CreateOrderRequest) -> Result<OrderHandle> {
        let url = self.url("/create-order")?;
        let res = self.client.post(url).json(order).send().await?;
        parse_response(res).await
    }

    pub async fn send_bill_reminders(&self, method: Method) -> Result<ReminderResponse> {
        let url = self.url("/send-bill-reminders")?;
        let res = self.client.request(method, url).send().await?;
        parse_response(res).await
    }
}

async fn parse_response<T: DeserializeOwned>(res: reqwest::Response) -> Result<T> {
    let status = res.status();
    if status.is_success() {
        return Ok(res.json::<T>().await?);
    }
    let message = error_message(res).await;
    Err(anyhow!("The server responded with {status}. {message}"))
}

/// Pulls the message out of the server's `{"error": "..."}` body, falling back to the raw body.
async fn error_message(res: reqwest::Response) -> String {
    let body = res.text().await.unwrap_or_default();
    serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or(body)
}

/// Uses the server's `/create-order` route as the order issuer for a checkout session.
impl OrderIssuer for PortalServerClient {
    async fn issue_order(&self, request: OrderRequest) -> Result<OrderHandle, OrderIssuerError> {
        let body = CreateOrderRequest {
            amount: Some(request.amount),
            currency: Some(request.currency),
            receipt: request.receipt,
            notes: Some(request.notes),
        };
        let url = self.url("/create-order").map_err(|e| OrderIssuerError::Unavailable(e.to_string()))?;
        debug!("Requesting an order from {url}");
        let res = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| OrderIssuerError::Unavailable(e.to_string()))?;
        let status = res.status();
        if status.is_success() {
            return res.json::<OrderHandle>().await.map_err(|e| OrderIssuerError::Unavailable(e.to_string()));
        }
        let message = error_message(res).await;
        match status.as_u16() {
            400 => Err(OrderIssuerError::InvalidAmount),
            code => Err(OrderIssuerError::GatewayError { status: code, message }),
        }
    }
}
