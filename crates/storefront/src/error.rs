//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::catalog::CatalogError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog API operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// HTTP status this error is reported with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Catalog(_) => StatusCode::BAD_GATEWAY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Catalog(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Catalog(_) => "External service error".to_string(),
            Self::BadRequest(_) => self.to_string(),
        };

        (self.status(), Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("item_id", "1-v1-Blue-128GB")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn upstream_failure() -> AppError {
        AppError::Catalog(CatalogError::Status {
            status: 500,
            url: "http://10.0.0.5/api/v1/shop/products".to_string(),
        })
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::BadRequest("quantity must be at least 1".to_string());
        assert_eq!(err.to_string(), "Bad request: quantity must be at least 1");

        assert_eq!(
            upstream_failure().to_string(),
            "Catalog error: Unexpected status 500 from http://10.0.0.5/api/v1/shop/products"
        );
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(get_status(upstream_failure()), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_upstream_details_hidden() {
        let response = upstream_failure().into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "External service error");
    }
}
