//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Cashier API                        │
//! │                                                                         │
//! │  Handler: Result<T, ApiError>                                          │
//! │         │                                                               │
//! │         ├── ValidationError / CoreError ───────┐                       │
//! │         ├── CheckoutError ──────────────────────┤                       │
//! │         ├── DbError ────────────────────────────┼──► ApiError           │
//! │         └── Json/Path/Query rejection ──────────┘       │               │
//! │                                                         ▼               │
//! │                                   (status, {"code", "message"})         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage failures are logged in full and returned with a generic message.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cashier_core::{CheckoutError, CoreError, ValidationError};
use cashier_db::DbError;
use serde::Serialize;

/// Error body returned by every failing route.
///
/// ```json
/// {
///   "code": "INSUFFICIENT_STOCK",
///   "message": "Insufficient stock for product 1: available 2, requested 5"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed body, path or query (400)
    InvalidRequest,

    /// Field-level validation failed (400)
    ValidationError,

    /// Resource not found (404)
    NotFound,

    /// Requested quantity exceeds stock (409)
    InsufficientStock,

    /// Duplicate value (409)
    Conflict,

    /// Checkout could not be persisted; nothing was changed (500)
    PersistenceError,

    /// Database operation failed (500)
    DatabaseError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::InvalidRequest | ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InsufficientStock | ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::PersistenceError | ErrorCode::DatabaseError | ErrorCode::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidRequest, message)
    }

    pub fn status(&self) -> StatusCode {
        self.code.status()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::new(ErrorCode::ValidationError, err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", id),
            CoreError::CategoryNotFound(id) => ApiError::not_found("Category", id),
            CoreError::TransactionNotFound(id) => ApiError::not_found("Transaction", id),
            CoreError::AmountOverflow => ApiError::invalid_request(err.to_string()),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::InvalidRequest(message) => ApiError::invalid_request(message),
            CheckoutError::NotFound(id) => ApiError::not_found("Product", id),
            CheckoutError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            CheckoutError::Persistence(detail) => {
                tracing::error!(error = %detail, "Checkout persistence failure");
                ApiError::new(
                    ErrorCode::PersistenceError,
                    "Checkout could not be saved; no changes were made",
                )
            }
        }
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, id),
            DbError::Validation(e) => e.into(),
            DbError::UniqueViolation { field, .. } => {
                ApiError::new(ErrorCode::Conflict, format!("{} already exists", field))
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::warn!("Foreign key violation: {}", message);
                ApiError::new(ErrorCode::ValidationError, "Referenced record does not exist")
            }
            DbError::SumOverflow(what) => ApiError::invalid_request(format!(
                "Report {} is too large to represent; use a narrower date range",
                what
            )),
            DbError::CheckViolation(message) => {
                tracing::warn!("Check constraint violation: {}", message);
                ApiError::new(ErrorCode::ValidationError, "Value violates a constraint")
            }
            other => {
                // Log the actual error but return a generic message
                tracing::error!(error = %other, "Database operation failed");
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::invalid_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::invalid_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::invalid_request(rejection.body_text())
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_error_status_codes() {
        let cases = [
            (CheckoutError::InvalidRequest("empty".into()), StatusCode::BAD_REQUEST),
            (CheckoutError::NotFound(7), StatusCode::NOT_FOUND),
            (
                CheckoutError::InsufficientStock {
                    product_id: 1,
                    available: 2,
                    requested: 5,
                },
                StatusCode::CONFLICT,
            ),
            (
                CheckoutError::Persistence("disk I/O error".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn test_persistence_details_are_not_exposed() {
        let err = ApiError::from(CheckoutError::Persistence("database is locked".into()));
        assert_eq!(err.code, ErrorCode::PersistenceError);
        assert!(!err.message.contains("locked"));
    }

    #[test]
    fn test_error_body_shape() {
        let err = ApiError::from(CheckoutError::InsufficientStock {
            product_id: 1,
            available: 2,
            requested: 5,
        });
        let body = serde_json::to_value(&err).unwrap();
        assert_eq!(body["code"], "INSUFFICIENT_STOCK");
        assert_eq!(
            body["message"],
            "Insufficient stock for product 1: available 2, requested 5"
        );
    }

    #[test]
    fn test_db_error_mapping() {
        assert_eq!(
            ApiError::from(DbError::not_found("Category", 3)).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(DbError::ForeignKeyViolation {
                message: "FOREIGN KEY constraint failed".into()
            })
            .code,
            ErrorCode::ValidationError
        );
        assert_eq!(
            ApiError::from(DbError::SumOverflow("total_revenue_cents".into())).status(),
            StatusCode::BAD_REQUEST
        );
        let internal = ApiError::from(DbError::QueryFailed("no such table: x".into()));
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.message, "Database operation failed");
    }

    #[test]
    fn test_validation_error_is_bad_request() {
        let err = ApiError::from(CoreError::Validation(ValidationError::Required {
            field: "name".into(),
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "name is required");
    }
}
