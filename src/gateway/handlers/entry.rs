//! API entry point handler

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;

use crate::mason::Document;

use super::super::response::mason;
use super::super::state::AppState;

/// API entry point: no data, just the starting affordances.
///
/// GET /
pub async fn entrypoint(State(state): State<Arc<AppState>>) -> Response {
    let mut body = Document::new();
    state.catalogue.add_accounts_all(&mut body);
    state.catalogue.add_orderbook(&mut body);
    state.catalogue.add_priceaction(&mut body);
    mason(StatusCode::OK, &body)
}
