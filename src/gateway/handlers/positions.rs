//! Position handlers (listing, lookup, leverage changes)
//!
//! Positions live on the venue only; nothing here touches the local
//! store beyond the account guards.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use serde_json::Value;

use crate::mason::Document;
use crate::venue::Position;

use super::super::auth::authorize;
use super::super::error::ApiError;
use super::super::response::{mason, no_content};
use super::super::state::AppState;
use super::super::types::{LeverageUpdate, parse_json_body, validate_document};
use super::accounts::{credentials, resolve_account};

fn position_fields(position: &Position) -> Document {
    Document::new()
        .with("symbol", position.symbol.clone())
        .with("size", position.current_qty)
        .with("leverage", position.effective_leverage())
        .with("avgEntryPrice", position.avg_entry_price)
        .with("liquidationPrice", position.liquidation_price)
}

/// List open positions; flat positions are filtered out.
///
/// GET /accounts/{apikey}/positions/
pub async fn list_positions(
    State(state): State<Arc<AppState>>,
    Path(apikey): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let account = resolve_account(&state, &apikey).await?;
    authorize(&account, &headers)?;

    let positions = state.venue.positions(credentials(&account)).await?;
    let catalogue = &state.catalogue;

    let items: Vec<Value> = positions
        .iter()
        .filter(|position| position.current_qty != 0)
        .map(|position| {
            let mut item = position_fields(position);
            catalogue.add_self(
                &mut item,
                catalogue.routes().position_href(&apikey, &position.symbol),
            );
            Value::from(item)
        })
        .collect();

    let mut body = Document::new().with("items", items);
    catalogue.add_account(&mut body, &apikey);
    catalogue.add_self(&mut body, catalogue.routes().positions_href(&apikey));
    Ok(mason(StatusCode::OK, &body))
}

/// Single position lookup. With no position open for the symbol the
/// body is controls-only; `edit` stays valid because leverage can be
/// set before a position exists.
///
/// GET /accounts/{apikey}/positions/{symbol}/
pub async fn get_position(
    State(state): State<Arc<AppState>>,
    Path((apikey, symbol)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let account = resolve_account(&state, &apikey).await?;
    authorize(&account, &headers)?;

    let positions = state.venue.positions(credentials(&account)).await?;
    let catalogue = &state.catalogue;

    let mut body = match positions.iter().find(|position| position.symbol == symbol) {
        Some(position) => position_fields(position),
        None => Document::new(),
    };
    catalogue.add_self(&mut body, catalogue.routes().position_href(&apikey, &symbol));
    catalogue.add_edit_position(&mut body, &apikey, &symbol);
    catalogue.add_positions_all(&mut body, &apikey);
    Ok(mason(StatusCode::OK, &body))
}

/// Change the leverage of a position. Reported as done only once the
/// venue accepted the change.
///
/// PATCH /accounts/{apikey}/positions/{symbol}/
pub async fn patch_position(
    State(state): State<Arc<AppState>>,
    Path((apikey, symbol)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let account = resolve_account(&state, &apikey).await?;
    authorize(&account, &headers)?;

    let document = parse_json_body(&headers, &body)?;
    let update: LeverageUpdate = validate_document(document)?;

    match state
        .venue
        .set_leverage(credentials(&account), &symbol, update.leverage)
        .await
    {
        Ok(()) => {
            tracing::info!(symbol = %symbol, leverage = update.leverage, "leverage changed");
            Ok(no_content())
        }
        Err(err) if err.is_client_rejection() => Err(ApiError::parameter_error(
            "One of the parameters have an invalid value",
        )),
        Err(err) => Err(err.into()),
    }
}
