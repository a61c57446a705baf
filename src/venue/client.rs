//! REST client for the trading venue.
//!
//! One thin wrapper per venue endpoint the gateway proxies. Signed
//! requests use the account's key pair (see [`sign`](super::sign));
//! market data endpoints go out unsigned.

use chrono::Utc;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::error::VenueError;
use super::sign;
use super::types::{MarginBalance, OrderAck, Position, Trade};

const ORDER_PATH: &str = "/api/v1/order";
const POSITION_PATH: &str = "/api/v1/position";
const LEVERAGE_PATH: &str = "/api/v1/position/leverage";
const TRADE_PATH: &str = "/api/v1/trade";
const MARGIN_PATH: &str = "/api/v1/user/margin";

/// Key pair used to sign one request.
#[derive(Debug, Clone, Copy)]
pub struct Credentials<'a> {
    pub api_key: &'a str,
    pub api_secret: &'a str,
}

/// HTTP client for the venue REST API.
#[derive(Debug, Clone)]
pub struct VenueClient {
    http: reqwest::Client,
    base_url: String,
}

impl VenueClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Place a limit order. The returned ack carries the venue-assigned
    /// order id the gateway mirrors locally.
    pub async fn place_order(
        &self,
        credentials: Credentials<'_>,
        symbol: &str,
        size: i64,
        price: f64,
        side: &str,
    ) -> Result<OrderAck, VenueError> {
        let body = json!({
            "symbol": symbol,
            "orderQty": size,
            "price": price,
            "side": side,
        });
        let bytes = self
            .send(Method::POST, ORDER_PATH, Some(credentials), Some(body))
            .await?;
        decode(&bytes)
    }

    /// Cancel an order on the venue. Success of the venue call is the
    /// precondition for dropping the local row.
    pub async fn cancel_order(
        &self,
        credentials: Credentials<'_>,
        order_id: &str,
    ) -> Result<(), VenueError> {
        let body = json!({ "orderID": order_id });
        self.send(Method::DELETE, ORDER_PATH, Some(credentials), Some(body))
            .await?;
        Ok(())
    }

    /// Most recent trades for a symbol (unsigned market data call).
    pub async fn recent_trades(&self, symbol: &str) -> Result<Vec<Trade>, VenueError> {
        let path = format!("{TRADE_PATH}?symbol={symbol}&count=10&reverse=true");
        let bytes = self.send(Method::GET, &path, None, None).await?;
        decode(&bytes)
    }

    /// All positions of the account, open or not; callers filter.
    pub async fn positions(
        &self,
        credentials: Credentials<'_>,
    ) -> Result<Vec<Position>, VenueError> {
        let bytes = self
            .send(Method::GET, POSITION_PATH, Some(credentials), None)
            .await?;
        decode(&bytes)
    }

    /// Margin balance of the account.
    pub async fn margin_balance(
        &self,
        credentials: Credentials<'_>,
    ) -> Result<MarginBalance, VenueError> {
        let path = format!("{MARGIN_PATH}?currency=XBt");
        let bytes = self.send(Method::GET, &path, Some(credentials), None).await?;
        decode(&bytes)
    }

    /// Change the leverage of a position. Works with or without an open
    /// position for the symbol.
    pub async fn set_leverage(
        &self,
        credentials: Credentials<'_>,
        symbol: &str,
        leverage: f64,
    ) -> Result<(), VenueError> {
        let body = json!({ "symbol": symbol, "leverage": leverage });
        self.send(Method::POST, LEVERAGE_PATH, Some(credentials), Some(body))
            .await?;
        Ok(())
    }

    /// Sends one request. `path_and_query` is signed exactly as sent;
    /// the nonce doubles as a freshness marker on the venue side.
    async fn send(
        &self,
        method: Method,
        path_and_query: &str,
        credentials: Option<Credentials<'_>>,
        body: Option<Value>,
    ) -> Result<Vec<u8>, VenueError> {
        let url = format!("{}{}", self.base_url, path_and_query);
        let body_text = body.as_ref().map(Value::to_string).unwrap_or_default();

        let mut request = self.http.request(method.clone(), url);
        if let Some(credentials) = credentials {
            let nonce = Utc::now().timestamp_millis();
            let signature = sign::sign_request(
                credentials.api_secret,
                method.as_str(),
                path_and_query,
                nonce,
                &body_text,
            )?;
            request = request
                .header("api-key", credentials.api_key)
                .header("api-nonce", nonce.to_string())
                .header("api-signature", signature);
        }
        if body.is_some() {
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body_text);
        }

        let response = request.send().await.map_err(VenueError::Unreachable)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(VenueError::Unreachable)?;

        if !status.is_success() {
            return Err(VenueError::Rejected {
                status: status.as_u16(),
                message: error_message(&bytes),
            });
        }
        Ok(bytes.to_vec())
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, VenueError> {
    serde_json::from_slice(bytes).map_err(|e| VenueError::Malformed(e.to_string()))
}

/// Pulls the human message out of the venue's `{"error": {"message"}}`
/// envelope, falling back to the raw body.
fn error_message(bytes: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<Value>(bytes) {
        if let Some(message) = value["error"]["message"].as_str() {
            return message.to_string();
        }
    }
    String::from_utf8_lossy(bytes).into_owned()
}
