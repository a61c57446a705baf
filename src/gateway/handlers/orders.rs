//! Order handlers (listing, placement, lookup, cancellation)

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use serde_json::Value;

use crate::mason::Document;
use crate::store::{Order, OrderRepository, is_unique_violation};

use super::super::auth::authorize;
use super::super::error::ApiError;
use super::super::response::{created, mason, no_content};
use super::super::state::AppState;
use super::super::types::{NewOrder, parse_json_body, validate_document};
use super::accounts::{credentials, resolve_account};

fn order_fields(order: &Order) -> Document {
    Document::new()
        .with("id", order.order_id.clone())
        .with("price", order.price)
        .with("symbol", order.symbol.clone())
        .with("side", order.side.clone())
        .with("size", order.size)
}

async fn resolve_order(state: &AppState, orderid: &str) -> Result<Order, ApiError> {
    OrderRepository::get_by_order_id(state.pool(), orderid)
        .await?
        .ok_or_else(|| ApiError::order_not_found(orderid))
}

/// List the open orders placed through this account
///
/// GET /accounts/{apikey}/orders/
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    Path(apikey): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let account = resolve_account(&state, &apikey).await?;
    authorize(&account, &headers)?;

    let orders = OrderRepository::list_for_account(state.pool(), account.id).await?;
    let catalogue = &state.catalogue;

    let items: Vec<Value> = orders
        .iter()
        .map(|order| {
            let mut item = order_fields(order);
            catalogue.add_self(
                &mut item,
                catalogue.routes().order_href(&apikey, &order.order_id),
            );
            Value::from(item)
        })
        .collect();

    let mut body = Document::new().with("items", items);
    catalogue.add_add_order(&mut body, &apikey);
    catalogue.add_self(&mut body, catalogue.routes().orders_href(&apikey));
    catalogue.add_account(&mut body, &apikey);
    Ok(mason(StatusCode::OK, &body))
}

/// Place an order on the venue and mirror the accepted order locally.
/// The row is only written once the venue ack decodes.
///
/// POST /accounts/{apikey}/orders/
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    Path(apikey): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let account = resolve_account(&state, &apikey).await?;
    authorize(&account, &headers)?;

    let document = parse_json_body(&headers, &body)?;
    let order: NewOrder = validate_document(document)?;

    let ack = state
        .venue
        .place_order(
            credentials(&account),
            &order.symbol,
            order.size,
            order.price,
            &order.side,
        )
        .await?;

    match OrderRepository::create(
        state.pool(),
        &ack.order_id,
        &ack.symbol,
        ack.order_qty,
        ack.price,
        &ack.side,
        account.id,
    )
    .await
    {
        Ok(_) => {}
        Err(err) if is_unique_violation(&err) => {
            return Err(ApiError::conflict(None));
        }
        Err(err) => return Err(err.into()),
    }

    tracing::info!(order = %ack.order_id, symbol = %ack.symbol, "order placed");
    Ok(created(
        state.catalogue.routes().order_href(&apikey, &ack.order_id),
    ))
}

/// Single order lookup
///
/// GET /accounts/{apikey}/orders/{orderid}/
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Path((apikey, orderid)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let account = resolve_account(&state, &apikey).await?;
    authorize(&account, &headers)?;
    let order = resolve_order(&state, &orderid).await?;

    let catalogue = &state.catalogue;
    let mut body = order_fields(&order);
    catalogue.add_self(&mut body, catalogue.routes().order_href(&apikey, &orderid));
    catalogue.add_orders_all(&mut body, &apikey);
    catalogue.add_delete_order(&mut body, &apikey, &orderid);
    Ok(mason(StatusCode::OK, &body))
}

/// Cancel an order on the venue, then drop the local row. The row
/// stays if the venue refuses the cancellation.
///
/// DELETE /accounts/{apikey}/orders/{orderid}/
pub async fn delete_order(
    State(state): State<Arc<AppState>>,
    Path((apikey, orderid)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let account = resolve_account(&state, &apikey).await?;
    authorize(&account, &headers)?;
    let order = resolve_order(&state, &orderid).await?;

    state
        .venue
        .cancel_order(credentials(&account), &orderid)
        .await?;

    OrderRepository::delete(state.pool(), order.id).await?;
    tracing::info!(order = %orderid, "order cancelled");
    Ok(no_content())
}

/// Order update placeholder
///
/// PUT /accounts/{apikey}/orders/{orderid}/ (always 503)
pub async fn update_order(Path((_, _)): Path<(String, String)>) -> ApiError {
    ApiError::not_implemented()
}

/// Order history placeholder
///
/// GET /accounts/{apikey}/orders/history/ (always 503)
pub async fn get_order_history(Path(_apikey): Path<String>) -> ApiError {
    ApiError::not_implemented()
}
