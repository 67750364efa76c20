//! Unified error handling with Sentry integration.
//!
//! Handlers return `Result<T, AppError>`. Server errors are captured to Sentry
//! before the response is written; the response body is the message as
//! `text/plain; charset=utf-8` followed by a newline.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::services::ServiceError;

/// Body returned for any not-found service error.
const NOT_FOUND_MESSAGE: &str = "customer not found";

/// Application-level error type for the HTTP layer.
#[derive(Debug, Error)]
pub enum AppError {
    /// Service call failed; the client sees only `message`.
    #[error("{message}: {source}")]
    Service {
        message: &'static str,
        #[source]
        source: ServiceError,
    },

    /// Service call failed; the client sees `message` followed by the
    /// underlying error text.
    ///
    /// Only the list endpoint uses this. It leaks storage details to the
    /// caller and is kept for wire compatibility.
    #[error("{message}: {source}")]
    ServiceVerbose {
        message: &'static str,
        #[source]
        source: ServiceError,
    },

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Returns a closure that wraps a `ServiceError` with a public message.
    pub fn service(message: &'static str) -> impl FnOnce(ServiceError) -> Self {
        move |source| Self::Service { message, source }
    }

    /// Like [`AppError::service`], but the body includes the error text.
    pub fn service_verbose(message: &'static str) -> impl FnOnce(ServiceError) -> Self {
        move |source| Self::ServiceVerbose { message, source }
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Service { source, .. } | Self::ServiceVerbose { source, .. }
                if source.is_not_found() =>
            {
                StatusCode::NOT_FOUND
            }
            Self::Service { .. } | Self::ServiceVerbose { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let message = match &self {
            _ if status == StatusCode::NOT_FOUND => NOT_FOUND_MESSAGE.to_string(),
            Self::Service { message, .. } => (*message).to_string(),
            Self::ServiceVerbose { .. } => self.to_string(),
            Self::BadRequest(message) => message.clone(),
        };

        // One line of plain text
        (status, format!("{message}\n")).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use customer_management_core::CustomerId;

    use super::*;
    use crate::services::CustomerService;
    use crate::test_support::InMemoryCustomerRepository;

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn not_found_error() -> ServiceError {
        let service = CustomerService::new(Arc::new(InMemoryCustomerRepository::default()));
        service.get_by_id(CustomerId::new(1)).await.unwrap_err()
    }

    async fn storage_error() -> ServiceError {
        let repository = Arc::new(InMemoryCustomerRepository::default());
        repository.fail_with_pool_timeout();
        CustomerService::new(repository).list().await.unwrap_err()
    }

    #[test]
    fn test_bad_request() {
        let err = AppError::BadRequest("invalid request body".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid request body");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_body_is_plain_text_line() {
        let response = AppError::BadRequest("invalid request body".to_string()).into_response();

        assert_eq!(
            response.headers()[axum::http::header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn test_bad_request_body_ends_with_newline() {
        let response = AppError::BadRequest("invalid request body".to_string()).into_response();
        assert_eq!(body_text(response).await, "invalid request body\n");
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404() {
        let err = AppError::service("could not fetch customer")(not_found_error().await);
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "customer not found\n");
    }

    #[tokio::test]
    async fn test_storage_failure_hides_details() {
        let err = AppError::service("could not create customer")(storage_error().await);
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "could not create customer\n");
    }

    #[tokio::test]
    async fn test_verbose_failure_includes_error_chain() {
        let err = AppError::service_verbose("failed to fetch customers")(storage_error().await);
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_text(response).await;
        assert!(body.starts_with("failed to fetch customers: customer not found: list customers: "));
        assert!(body.ends_with('\n'));
    }
}
