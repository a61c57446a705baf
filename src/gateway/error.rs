//! Gateway error taxonomy.
//!
//! Every guard failure and caught store/venue fault becomes an
//! [`ApiError`]: an HTTP status plus the Mason `@error` title/message
//! pair. Errors travel through the response extensions so the error
//! layer in `gateway` can fill in the requested path as `resource_url`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::mason::{Document, error_document};
use crate::venue::VenueError;

use super::response::mason;

/// Failure reported at the handler boundary. Terminal for the request;
/// reported once, never retried.
#[derive(Debug, Clone, Error)]
#[error("{status} {title}")]
pub struct ApiError {
    status: StatusCode,
    title: String,
    message: Option<String>,
}

impl ApiError {
    fn new(status: StatusCode, title: impl Into<String>, message: Option<String>) -> Self {
        Self {
            status,
            title: title.into(),
            message,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn account_not_found(apikey: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "Account does not exist",
            Some(format!("Account with api-key '{apikey}' does not exist.")),
        )
    }

    pub fn order_not_found(orderid: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "Order does not exist",
            Some(format!("Order with orderid '{orderid}' does not exist.")),
        )
    }

    pub fn unauthorized(message: &str) -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "Unauthorized",
            Some(message.to_string()),
        )
    }

    pub fn unsupported_media_type() -> Self {
        Self::new(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Unsupported media type",
            Some("Requests must be JSON".to_string()),
        )
    }

    /// Schema validation failure; `detail` is the validator's own
    /// explanation.
    pub fn invalid_document(detail: String) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "Invalid JSON document",
            Some(detail),
        )
    }

    pub fn conflict(message: Option<String>) -> Self {
        Self::new(StatusCode::CONFLICT, "Already exists", message)
    }

    pub fn query_error(message: &str) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "Query Error",
            Some(message.to_string()),
        )
    }

    pub fn parameter_error(message: &str) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "Parameter Error",
            Some(message.to_string()),
        )
    }

    /// Deliberate placeholder for accepted-but-unimplemented routes.
    pub fn not_implemented() -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, "Not implemented", None)
    }

    pub fn bad_gateway(message: String) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, "Venue unavailable", Some(message))
    }

    pub fn internal(message: String) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            Some(message),
        )
    }

    /// Renders the full Mason failure body for the requested path.
    pub fn into_mason_response(self, resource_url: &str) -> Response {
        let body = error_document(resource_url, &self.title, self.message.as_deref());
        mason(self.status, &body)
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!(error = %err, "storage failure");
        Self::internal(format!("storage failure: {err}"))
    }
}

impl From<VenueError> for ApiError {
    fn from(err: VenueError) -> Self {
        match err {
            VenueError::Rejected { status, message } if (400..500).contains(&status) => {
                Self::parameter_error(&message)
            }
            other => {
                tracing::error!(error = %other, "venue call failed");
                Self::bad_gateway(other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Fallback body without resource_url; the error layer rebuilds
        // the response with the path filled in.
        let mut body = Document::new();
        body.add_error(&self.title, self.message.as_deref());
        let mut response = mason(self.status, &body);
        response.extensions_mut().insert(self);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_statuses() {
        assert_eq!(
            ApiError::account_not_found("k").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::unauthorized("x").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::unsupported_media_type().status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            ApiError::invalid_document("d".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::conflict(None).status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::not_implemented().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_venue_rejection_maps_to_parameter_error() {
        let err = ApiError::from(VenueError::Rejected {
            status: 400,
            message: "Invalid leverage".to_string(),
        });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.title(), "Parameter Error");
    }

    #[test]
    fn test_venue_server_errors_map_to_bad_gateway() {
        let err = ApiError::from(VenueError::Rejected {
            status: 503,
            message: "maintenance".to_string(),
        });
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);

        let err = ApiError::from(VenueError::Malformed("truncated".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_mason_response_carries_content_type() {
        let response = ApiError::account_not_found("zzz").into_mason_response("/accounts/zzz/");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .unwrap();
        assert_eq!(content_type, crate::mason::MASON);
    }

    #[test]
    fn test_error_body_shape() {
        let body = error_document(
            "/accounts/zzz/",
            "Account does not exist",
            Some("Account with api-key 'zzz' does not exist."),
        );
        let value = Value::from(body);
        assert_eq!(value["resource_url"], "/accounts/zzz/");
        assert_eq!(value["@error"]["@message"], "Account does not exist");
        assert_eq!(value["@error"]["@messages"].as_array().unwrap().len(), 1);
    }
}
