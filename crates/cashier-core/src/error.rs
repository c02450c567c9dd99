//! # Error Types
//!
//! Domain-specific error types for cashier-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cashier-core errors (this file)                                       │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  ├── CoreError        - Catalog and reporting rule violations          │
//! │  └── CheckoutError    - The four ways a checkout can fail              │
//! │                                                                         │
//! │  cashier-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                       (converted into CheckoutError::Persistence)      │
//! │                                                                         │
//! │  cashier-api errors (in app)                                           │
//! │  └── ApiError         - What HTTP clients see (status + JSON body)     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError/CheckoutError → ApiError → Client   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Catalog and reporting errors.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    #[error("Category not found: {0}")]
    CategoryNotFound(i64),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    /// A line subtotal or cart total does not fit in `i64` cents.
    #[error("Amount overflow while pricing the cart")]
    AmountOverflow,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Checkout Error
// =============================================================================

/// Failure taxonomy of a checkout.
///
/// ## Where Each Variant Comes From
/// ```text
/// Validating ──► InvalidRequest     (empty cart, quantity <= 0, bad id)
/// Pricing    ──► NotFound           (product row missing)
///            ──► InsufficientStock  (requested > observed stock)
/// Persisting ──► Persistence        (header/line insert failed)
/// Adjusting  ──► InsufficientStock  (conditional decrement matched 0 rows)
///            ──► Persistence        (store failure, write conflict, commit)
/// ```
///
/// Every variant raised after the unit of work opened means it was rolled
/// back: no transaction row and no stock change survive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("Invalid checkout request: {0}")]
    InvalidRequest(String),

    #[error("Product not found: {0}")]
    NotFound(i64),

    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: i64,
        available: i64,
        requested: i64,
    },

    #[error("Persistence failure: {0}")]
    Persistence(String),
}

impl From<ValidationError> for CheckoutError {
    fn from(err: ValidationError) -> Self {
        CheckoutError::InvalidRequest(err.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_error_messages() {
        let err = CheckoutError::InsufficientStock {
            product_id: 7,
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for product 7: available 3, requested 5"
        );
        assert_eq!(CheckoutError::NotFound(42).to_string(), "Product not found: 42");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_and_checkout_errors() {
        let validation_err = ValidationError::Required {
            field: "items".to_string(),
        };
        let core_err: CoreError = validation_err.clone().into();
        assert!(matches!(core_err, CoreError::Validation(_)));

        let checkout_err: CheckoutError = validation_err.into();
        assert_eq!(
            checkout_err,
            CheckoutError::InvalidRequest("items is required".to_string())
        );
    }
}
