//! Account handlers (registration, login, balance, wallet history)

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use serde_json::Value;

use crate::mason::{Control, Document};
use crate::store::{Account, AccountRepository, is_unique_violation};
use crate::venue::Credentials;

use super::super::auth::authorize;
use super::super::error::ApiError;
use super::super::response::{created, mason, no_content};
use super::super::state::AppState;
use super::super::types::{NewAccount, parse_json_body, validate_document};

/// Resolves the account addressed by the path, 404 when absent.
pub(super) async fn resolve_account(
    state: &AppState,
    apikey: &str,
) -> Result<Account, ApiError> {
    AccountRepository::get_by_public_key(state.pool(), apikey)
        .await?
        .ok_or_else(|| ApiError::account_not_found(apikey))
}

pub(super) fn credentials(account: &Account) -> Credentials<'_> {
    Credentials {
        api_key: &account.api_public,
        api_secret: &account.api_secret,
    }
}

/// List the registered accounts
///
/// GET /accounts/
pub async fn list_accounts(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let accounts = AccountRepository::list_all(state.pool()).await?;
    let catalogue = &state.catalogue;

    let items: Vec<Value> = accounts
        .iter()
        .map(|account| {
            let mut item = Document::new()
                .with("accountname", account.username.clone())
                .with("api_public", account.api_public.clone());
            item.add_control(
                "self",
                Control::get(catalogue.routes().account_href(&account.api_public))
                    .title("Login to account"),
            );
            Value::from(item)
        })
        .collect();

    let mut body = Document::new().with("items", items);
    catalogue.add_self(&mut body, catalogue.routes().accounts_href());
    catalogue.add_add_account(&mut body);
    Ok(mason(StatusCode::OK, &body))
}

/// Register a new account
///
/// POST /accounts/
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let document = parse_json_body(&headers, &body)?;
    let new_account: NewAccount = validate_document(document)?;

    match AccountRepository::create(
        state.pool(),
        &new_account.accountname,
        &new_account.api_public,
        &new_account.api_secret,
    )
    .await
    {
        Ok(_) => {}
        Err(err) if is_unique_violation(&err) => {
            return Err(ApiError::conflict(Some(format!(
                "Account with name '{}' already exists.",
                new_account.accountname
            ))));
        }
        Err(err) => return Err(err.into()),
    }

    tracing::info!(account = %new_account.accountname, "account registered");
    Ok(created(
        state.catalogue.routes().account_href(&new_account.api_public),
    ))
}

/// Log in to an account: its data plus everything reachable from it.
///
/// GET /accounts/{apikey}/
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(apikey): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let account = resolve_account(&state, &apikey).await?;
    authorize(&account, &headers)
        .map_err(|_| ApiError::unauthorized("need secret api-key in the http header"))?;

    let mut body = Document::new()
        .with("accountname", account.username.clone())
        .with("api_public", account.api_public.clone())
        .with("api_secret", account.api_secret.clone());

    let catalogue = &state.catalogue;
    catalogue.add_self(&mut body, catalogue.routes().account_href(&apikey));
    catalogue.add_orders_all(&mut body, &apikey);
    catalogue.add_balance(&mut body, &apikey);
    catalogue.add_positions_all(&mut body, &apikey);
    catalogue.add_transactions(&mut body, &apikey);
    catalogue.add_delete_account(&mut body, &apikey);
    catalogue.add_accounts_all(&mut body);
    Ok(mason(StatusCode::OK, &body))
}

/// Delete an account; its orders cascade away at the store layer.
///
/// DELETE /accounts/{apikey}/
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    Path(apikey): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let account = resolve_account(&state, &apikey).await?;
    authorize(&account, &headers)?;

    AccountRepository::delete(state.pool(), account.id).await?;
    tracing::info!(account = %account.username, "account deleted");
    Ok(no_content())
}

/// Margin balance, fetched live from the venue.
///
/// GET /accounts/{apikey}/balance/
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    Path(apikey): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let account = resolve_account(&state, &apikey).await?;
    authorize(&account, &headers)?;

    let balance = state.venue.margin_balance(credentials(&account)).await?;

    let mut body = Document::new()
        .with("currency", balance.currency)
        .with("wallet_balance", balance.wallet_balance)
        .with("margin_balance", balance.margin_balance)
        .with("available_margin", balance.available_margin);
    state.catalogue.add_account(&mut body, &apikey);
    state.catalogue.add_transactions(&mut body, &apikey);
    Ok(mason(StatusCode::OK, &body))
}

/// Wallet transaction history. The venue listing is not wired up, so
/// the body only carries the ways onward; the guards still apply.
///
/// GET /accounts/{apikey}/history/
pub async fn get_transaction_history(
    State(state): State<Arc<AppState>>,
    Path(apikey): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let account = resolve_account(&state, &apikey).await?;
    authorize(&account, &headers)?;

    let mut body = Document::new();
    state.catalogue.add_account(&mut body, &apikey);
    state.catalogue.add_balance(&mut body, &apikey);
    Ok(mason(StatusCode::OK, &body))
}
