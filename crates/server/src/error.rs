//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`; failures surface as JSON bodies carrying one of
//! the fixed taxonomy codes (`BAD_REQUEST`, `NOT_FOUND`, `FORBIDDEN`,
//! `UNAUTHENTICATED`, `INTERNAL`).

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::checkout::CheckoutError;
use crate::services::media::MediaError;

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Checkout workflow failed.
    #[error("Checkout error: {0}")]
    Checkout(CheckoutError),

    /// Media storage failed.
    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    /// Resource not found, or not visible to the caller.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller is authenticated but lacks the required role.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// No caller identity where one is required.
    #[error("Unauthenticated")]
    Unauthenticated,

    /// Malformed or invalid input.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound("resource not found".to_owned()),
            RepositoryError::Conflict(msg) => Self::BadRequest(msg),
            other => Self::Database(other),
        }
    }
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        // Validation failures are the caller's fault; a repository
        // failure underneath checkout is ours.
        match err {
            CheckoutError::Repository(e) => Self::Database(e),
            other => Self::Checkout(other),
        }
    }
}

/// Wire shape of an error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl AppError {
    /// The taxonomy code reported to clients.
    const fn code(&self) -> &'static str {
        match self {
            Self::Database(_) | Self::Internal(_) | Self::Media(_) => "INTERNAL",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Unauthenticated | Self::Auth(AuthError::InvalidCredentials) => "UNAUTHENTICATED",
            Self::BadRequest(_) | Self::Auth(_) | Self::Checkout(_) => "BAD_REQUEST",
        }
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::Database(_) | Self::Internal(_) | Self::Media(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Unauthenticated | Self::Auth(AuthError::InvalidCredentials) => {
                StatusCode::UNAUTHORIZED
            }
            Self::BadRequest(_) | Self::Auth(_) | Self::Checkout(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// The client-facing message; internals are redacted.
    fn message(&self) -> String {
        match self {
            Self::Database(_) | Self::Internal(_) | Self::Media(_) => {
                "Internal server error".to_owned()
            }
            Self::Auth(err) => err.client_message(),
            Self::Checkout(err) => err.client_message(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Database(_) | Self::Internal(_) | Self::Media(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let body = ErrorBody {
            code: self.code(),
            message: self.message(),
        };

        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product 123".to_string());
        assert_eq!(err.to_string(), "Not found: product 123");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Forbidden("test".to_string())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::Unauthenticated),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_taxonomy_codes() {
        assert_eq!(AppError::Unauthenticated.code(), "UNAUTHENTICATED");
        assert_eq!(AppError::Forbidden(String::new()).code(), "FORBIDDEN");
        assert_eq!(AppError::NotFound(String::new()).code(), "NOT_FOUND");
        assert_eq!(AppError::BadRequest(String::new()).code(), "BAD_REQUEST");
        assert_eq!(AppError::Internal(String::new()).code(), "INTERNAL");
    }

    #[test]
    fn test_invalid_credentials_is_unauthenticated() {
        let err = AppError::Auth(AuthError::InvalidCredentials);
        assert_eq!(err.code(), "UNAUTHENTICATED");
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_checkout_repository_failure_is_internal() {
        let err: AppError =
            CheckoutError::Repository(RepositoryError::NotFound).into();
        assert_eq!(err.code(), "INTERNAL");
    }

    #[test]
    fn test_repository_conflict_is_bad_request() {
        // Deleting an ever-sold product trips the order_items FK; the
        // repository reports it as a conflict the caller can act on.
        let err: AppError = RepositoryError::Conflict(
            "product has orders and cannot be deleted; deactivate it instead".to_string(),
        )
        .into();
        assert_eq!(err.code(), "BAD_REQUEST");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.message().contains("deactivate"));
    }

    #[test]
    fn test_internal_details_redacted() {
        let err = AppError::Internal("pool exhausted".to_string());
        assert_eq!(err.message(), "Internal server error");
    }
}
