//! Request body contracts and JSON body guards.
//!
//! The typed structs here enforce exactly the required fields and types
//! that the advertised control schemas declare (`mason::schema`), so a
//! document that validates here is one the schema accepts.

use axum::http::{HeaderMap, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;

/// Body of `add-account`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAccount {
    pub accountname: String,
    pub api_public: String,
    pub api_secret: String,
}

/// Body of `add-order`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewOrder {
    pub symbol: String,
    pub size: i64,
    pub price: f64,
    pub side: String,
}

/// Body of the position `edit` control.
#[derive(Debug, Clone, Deserialize)]
pub struct LeverageUpdate {
    pub leverage: f64,
}

/// First body guard: a JSON body must be present at all.
pub fn parse_json_body(headers: &HeaderMap, body: &[u8]) -> Result<Value, ApiError> {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.contains("json"))
        .unwrap_or(false);
    if !is_json || body.is_empty() {
        return Err(ApiError::unsupported_media_type());
    }
    serde_json::from_slice(body).map_err(|e| ApiError::invalid_document(e.to_string()))
}

/// Second body guard: the document must satisfy the advertised schema.
pub fn validate_document<T: DeserializeOwned>(document: Value) -> Result<T, ApiError> {
    serde_json::from_value(document).map_err(|e| ApiError::invalid_document(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode};
    use serde_json::json;

    fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers
    }

    #[test]
    fn test_missing_body_is_unsupported_media_type() {
        let err = parse_json_body(&json_headers(), b"").unwrap_err();
        assert_eq!(err.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[test]
    fn test_non_json_content_type_is_unsupported_media_type() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        let err = parse_json_body(&headers, b"{}").unwrap_err();
        assert_eq!(err.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[test]
    fn test_unparseable_body_is_invalid_document() {
        let err = parse_json_body(&json_headers(), b"{not json").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.title(), "Invalid JSON document");
    }

    #[test]
    fn test_order_missing_price_fails_validation() {
        let document = json!({ "symbol": "XBTUSD", "size": 100, "side": "Buy" });
        let err = validate_document::<NewOrder>(document).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.title(), "Invalid JSON document");
    }

    #[test]
    fn test_order_fractional_size_fails_validation() {
        let document =
            json!({ "symbol": "XBTUSD", "size": 0.5, "price": 9500.0, "side": "Buy" });
        assert!(validate_document::<NewOrder>(document).is_err());
    }

    #[test]
    fn test_valid_order_passes() {
        let document =
            json!({ "symbol": "XBTUSD", "size": 100, "price": 9500.0, "side": "Buy" });
        let order: NewOrder = validate_document(document).unwrap();
        assert_eq!(order.symbol, "XBTUSD");
        assert_eq!(order.size, 100);
    }

    #[test]
    fn test_account_requires_all_three_fields() {
        let document = json!({ "accountname": "alice", "api_public": "pk" });
        assert!(validate_document::<NewAccount>(document).is_err());

        let document =
            json!({ "accountname": "alice", "api_public": "pk", "api_secret": "sk" });
        assert!(validate_document::<NewAccount>(document).is_ok());
    }

    #[test]
    fn test_leverage_must_be_numeric() {
        assert!(validate_document::<LeverageUpdate>(json!({ "leverage": "ten" })).is_err());
        let update: LeverageUpdate = validate_document(json!({ "leverage": 12.5 })).unwrap();
        assert_eq!(update.leverage, 12.5);
    }
}
