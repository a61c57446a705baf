//! JSON schemas advertised by the body-bearing controls.
//!
//! These documents double as the contract the gateway validates incoming
//! bodies against (see `gateway::types`), so the advertised schema and
//! the enforced one cannot drift apart silently.

use serde_json::{Value, json};

/// Body accepted by `add-account`.
pub fn account_schema() -> Value {
    json!({
        "type": "object",
        "required": ["accountname", "api_public", "api_secret"],
        "properties": {
            "accountname": {
                "description": "name of the account",
                "type": "string"
            },
            "api_public": {
                "description": "public part of the api-key",
                "type": "string"
            },
            "api_secret": {
                "description": "secret part of the api-key",
                "type": "string"
            }
        }
    })
}

/// Body accepted by `add-order`.
pub fn order_schema() -> Value {
    json!({
        "type": "object",
        "required": ["symbol", "size", "price", "side"],
        "properties": {
            "symbol": {
                "description": "Order trading pair symbol",
                "type": "string"
            },
            "size": {
                "description": "The size of the order in contracts",
                "type": "integer"
            },
            "price": {
                "description": "price of the order",
                "type": "number"
            },
            "side": {
                "description": "side of the order",
                "type": "string"
            }
        }
    })
}

/// Body accepted by the position `edit` control.
pub fn position_schema() -> Value {
    json!({
        "type": "object",
        "required": ["leverage"],
        "properties": {
            "leverage": {
                "description": "Leverage of the position",
                "type": "number"
            }
        }
    })
}
