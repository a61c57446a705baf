//! Typed venue wire shapes.
//!
//! The venue speaks camelCase JSON; decoding into these structs turns a
//! shape change on their side into a typed `Malformed` error instead of
//! a lookup panic deep in a handler.

use serde::Deserialize;

/// One open position as reported by the venue.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub symbol: String,
    #[serde(default)]
    pub current_qty: i64,
    #[serde(default)]
    pub leverage: f64,
    #[serde(default)]
    pub cross_margin: bool,
    #[serde(default)]
    pub avg_entry_price: Option<f64>,
    #[serde(default)]
    pub liquidation_price: Option<f64>,
}

impl Position {
    /// Leverage as exposed to clients: cross-margined positions report 0.
    pub fn effective_leverage(&self) -> f64 {
        if self.cross_margin { 0.0 } else { self.leverage }
    }
}

/// One executed market trade.
#[derive(Debug, Clone, Deserialize)]
pub struct Trade {
    pub symbol: String,
    pub side: String,
    pub size: i64,
    pub price: f64,
}

/// Venue acknowledgement of an accepted order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAck {
    #[serde(rename = "orderID")]
    pub order_id: String,
    pub symbol: String,
    pub order_qty: i64,
    pub price: f64,
    pub side: String,
}

/// Margin balance snapshot for an account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginBalance {
    pub currency: String,
    #[serde(default)]
    pub wallet_balance: i64,
    #[serde(default)]
    pub margin_balance: i64,
    #[serde(default)]
    pub available_margin: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_decodes_from_venue_shape() {
        let json = r#"{
            "symbol": "XBTUSD",
            "currentQty": 100,
            "leverage": 25.0,
            "crossMargin": false,
            "avgEntryPrice": 9431.5,
            "liquidationPrice": 9100.0,
            "unrealisedPnl": -1200
        }"#;
        let position: Position = serde_json::from_str(json).unwrap();
        assert_eq!(position.symbol, "XBTUSD");
        assert_eq!(position.current_qty, 100);
        assert_eq!(position.effective_leverage(), 25.0);
        assert_eq!(position.avg_entry_price, Some(9431.5));
    }

    #[test]
    fn test_cross_margin_reports_zero_leverage() {
        let json = r#"{"symbol": "XBTUSD", "currentQty": 10, "leverage": 100.0, "crossMargin": true}"#;
        let position: Position = serde_json::from_str(json).unwrap();
        assert_eq!(position.effective_leverage(), 0.0);
    }

    #[test]
    fn test_order_ack_decodes_order_id() {
        let json = r#"{
            "orderID": "5a3e-11ab",
            "symbol": "XBTUSD",
            "orderQty": 100,
            "price": 9500.0,
            "side": "Buy",
            "ordStatus": "New"
        }"#;
        let ack: OrderAck = serde_json::from_str(json).unwrap();
        assert_eq!(ack.order_id, "5a3e-11ab");
        assert_eq!(ack.order_qty, 100);
    }

    #[test]
    fn test_order_ack_rejects_missing_order_id() {
        let json = r#"{"symbol": "XBTUSD", "orderQty": 100, "price": 9500.0, "side": "Buy"}"#;
        let result: Result<OrderAck, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_trade_decodes() {
        let json = r#"{"symbol": "XBTUSD", "side": "Sell", "size": 13, "price": 9487.5}"#;
        let trade: Trade = serde_json::from_str(json).unwrap();
        assert_eq!(trade.side, "Sell");
        assert_eq!(trade.price, 9487.5);
    }

    #[test]
    fn test_margin_balance_tolerates_missing_optionals() {
        let json = r#"{"currency": "XBt"}"#;
        let balance: MarginBalance = serde_json::from_str(json).unwrap();
        assert_eq!(balance.currency, "XBt");
        assert_eq!(balance.wallet_balance, 0);
    }
}
