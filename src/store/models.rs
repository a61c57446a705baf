//! Persisted rows: trading accounts and their venue orders.

/// Registered trading account: a name plus the venue key pair.
///
/// `api_public` identifies the account in every route; `api_secret` is
/// the shared secret compared against the `api_secret` request header.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub api_public: String,
    pub api_secret: String,
}

/// Order accepted by the venue and mirrored locally.
///
/// `order_id` is the venue-assigned identifier; rows cascade away with
/// their owning account.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: i64,
    pub order_id: String,
    pub symbol: String,
    pub size: i64,
    pub price: f64,
    pub side: String,
    pub account_id: i64,
}
