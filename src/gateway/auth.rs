//! Shared-secret authorization.
//!
//! Account-scoped routes require the account's secret key in the
//! `api_secret` request header. One plain comparison per request; there
//! are no sessions and no tokens.

use axum::http::HeaderMap;

use crate::store::Account;

use super::error::ApiError;

/// Header carrying the caller's secret key.
pub const SECRET_HEADER: &str = "api_secret";

/// Compares the `api_secret` header against the stored secret.
pub fn authorize(account: &Account, headers: &HeaderMap) -> Result<(), ApiError> {
    let provided = headers
        .get(SECRET_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("No API-key or wrong API-key"))?;
    if provided != account.api_secret {
        return Err(ApiError::unauthorized("No API-key or wrong API-key"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode};

    fn account() -> Account {
        Account {
            id: 1,
            username: "alice".to_string(),
            api_public: "pk1".to_string(),
            api_secret: "sk1".to_string(),
        }
    }

    #[test]
    fn test_missing_header_is_unauthorized() {
        let err = authorize(&account(), &HeaderMap::new()).unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_wrong_secret_is_unauthorized() {
        let mut headers = HeaderMap::new();
        headers.insert(SECRET_HEADER, HeaderValue::from_static("wrong"));
        assert!(authorize(&account(), &headers).is_err());
    }

    #[test]
    fn test_correct_secret_passes() {
        let mut headers = HeaderMap::new();
        headers.insert(SECRET_HEADER, HeaderValue::from_static("sk1"));
        assert!(authorize(&account(), &headers).is_ok());
    }
}
