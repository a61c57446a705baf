//! HTTP gateway: router, shared state and the Mason error layer.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod response;
pub mod state;
pub mod types;

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::middleware::{Next, from_fn};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use crate::config::GatewayConfig;

use error::ApiError;
use state::AppState;

/// Rewrites handler errors into full Mason failure bodies.
///
/// Handlers return [`ApiError`]s without knowing the requested path;
/// this layer picks the error back out of the response extensions and
/// renders the body with `resource_url` filled in.
async fn mason_error_layer(request: Request<Body>, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let mut response = next.run(request).await;
    if let Some(err) = response.extensions_mut().remove::<ApiError>() {
        return err.into_mason_response(&path);
    }
    response
}

/// Build the full route tree over `state`.
///
/// The paths come from the catalogue's route table, the same templates
/// the controls render hrefs from.
pub fn build_router(state: Arc<AppState>) -> Router {
    let routes = state.catalogue.routes().clone();
    Router::new()
        .route(routes.entry, get(handlers::entrypoint))
        .route(
            routes.accounts,
            get(handlers::list_accounts).post(handlers::create_account),
        )
        .route(
            routes.account,
            get(handlers::get_account).delete(handlers::delete_account),
        )
        .route(
            routes.orders,
            get(handlers::list_orders).post(handlers::create_order),
        )
        .route(
            routes.order,
            get(handlers::get_order)
                .delete(handlers::delete_order)
                .put(handlers::update_order),
        )
        .route(routes.order_history, get(handlers::get_order_history))
        .route(routes.balance, get(handlers::get_balance))
        .route(routes.transactions, get(handlers::get_transaction_history))
        .route(routes.positions, get(handlers::list_positions))
        .route(
            routes.position,
            get(handlers::get_position).patch(handlers::patch_position),
        )
        .route(routes.priceaction, get(handlers::get_priceaction))
        .route(
            routes.priceaction_bucketed,
            get(handlers::get_bucketed_priceaction),
        )
        .route(routes.orderbook, get(handlers::get_orderbook))
        .layer(from_fn(mason_error_layer))
        .with_state(state)
}

/// Start the HTTP gateway server.
pub async fn run_server(config: &GatewayConfig, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = build_router(state);
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("gateway listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
