//! Market data handlers (recent trades, order book placeholders)

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::mason::Document;

use super::super::error::ApiError;
use super::super::response::mason;
use super::super::state::AppState;

/// Recent trades for a symbol, fetched live from the venue.
///
/// GET /priceaction/?symbol=XBTUSD
pub async fn get_priceaction(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let symbol = params
        .get("symbol")
        .filter(|symbol| !symbol.is_empty())
        .ok_or_else(|| ApiError::query_error("Missing Query Parameter \"symbol\""))?;

    let trades = match state.venue.recent_trades(symbol).await {
        Ok(trades) => trades,
        Err(err) if err.is_client_rejection() => {
            return Err(ApiError::query_error("Query Parameter doesn't exist"));
        }
        Err(err) => return Err(err.into()),
    };

    let items: Vec<Value> = trades
        .iter()
        .map(|trade| {
            Document::new()
                .with("symbol", trade.symbol.clone())
                .with("side", trade.side.clone())
                .with("size", trade.size)
                .with("price", trade.price)
                .into()
        })
        .collect();

    let catalogue = &state.catalogue;
    let mut body = Document::new().with("items", items);
    catalogue.add_self(
        &mut body,
        catalogue.routes().priceaction_href(Some(symbol.as_str())),
    );
    catalogue.add_buckets(&mut body);
    Ok(mason(StatusCode::OK, &body))
}

/// Order book placeholder
///
/// GET /orderbook/ (always 503)
pub async fn get_orderbook() -> ApiError {
    ApiError::not_implemented()
}

/// Bucketed price action placeholder
///
/// GET /priceaction/bucketed/ (always 503)
pub async fn get_bucketed_priceaction() -> ApiError {
    ApiError::not_implemented()
}
