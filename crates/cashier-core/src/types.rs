//! # Domain Types
//!
//! Core domain types used throughout the cashier backend.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │    Category     │◄──│    Product      │  category_id: ON DELETE      │
//! │  │  ─────────────  │   │  ─────────────  │  SET NULL                    │
//! │  │  id (i64)       │   │  id (i64)       │                              │
//! │  │  name           │   │  name           │                              │
//! │  │  description    │   │  price_cents    │                              │
//! │  └─────────────────┘   │  stock (>= 0)   │                              │
//! │                        └────────▲────────┘                              │
//! │                                 │ product_id (nullable)                 │
//! │  ┌─────────────────┐   ┌────────┴────────┐                              │
//! │  │  Transaction    │──►│ TransactionLine │  owned, ON DELETE CASCADE    │
//! │  │  ─────────────  │   │  ─────────────  │                              │
//! │  │  id (UUID)      │   │  product_name   │  snapshot at time of sale    │
//! │  │  total_amount   │   │  unit_price     │  snapshot at time of sale    │
//! │  │  created_at     │   │  quantity       │                              │
//! │  └─────────────────┘   │  subtotal       │  fixed at commit             │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog rows use store-generated integer ids. Transactions and lines use
//! UUID v4 strings generated by the writer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{
    validate_category_name, validate_description, validate_id, validate_price_cents,
    validate_product_name, validate_stock, ValidationResult,
};

// =============================================================================
// Category
// =============================================================================

/// A product grouping such as "Electronics".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Input for creating or replacing a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewCategory {
    /// Trims the name and checks field rules.
    pub fn validated(mut self) -> ValidationResult<Self> {
        self.name = self.name.trim().to_string();
        validate_category_name(&self.name)?;
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        Ok(self)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Store-generated identifier.
    pub id: i64,

    /// Display name shown to cashier and on receipt.
    pub name: String,

    /// Price in cents.
    pub price_cents: i64,

    /// Units on hand. Never negative.
    pub stock: i64,

    pub category_id: Option<i64>,

    /// Joined from the category table on reads; `None` when uncategorized.
    pub category_name: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Product {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// Input for creating or replacing a product.
///
/// Used by both `POST /api/products` and `PUT /api/products/{id}`: an
/// update replaces every mutable field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price_cents: i64,
    pub stock: i64,
    #[serde(default)]
    pub category_id: Option<i64>,
}

impl NewProduct {
    /// Trims the name and checks field rules.
    ///
    /// Whether `category_id` points at an existing category is left to the
    /// store's foreign key.
    pub fn validated(mut self) -> ValidationResult<Self> {
        self.name = self.name.trim().to_string();
        validate_product_name(&self.name)?;
        validate_price_cents(self.price_cents)?;
        validate_stock(self.stock)?;
        if let Some(category_id) = self.category_id {
            validate_id("category_id", category_id)?;
        }
        Ok(self)
    }
}

/// Filter and paging for product listings.
///
/// `page` is 1-based; the offset is `(page - 1) * limit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuery {
    /// Case-insensitive substring match on the product name.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    crate::DEFAULT_PAGE_SIZE
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            name: None,
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl ProductQuery {
    pub fn validated(mut self) -> ValidationResult<Self> {
        if self.page < 1 {
            return Err(ValidationError::MustBePositive {
                field: "page".to_string(),
            });
        }
        if self.limit < 1 || self.limit > crate::MAX_PAGE_SIZE {
            return Err(ValidationError::OutOfRange {
                field: "limit".to_string(),
                min: 1,
                max: crate::MAX_PAGE_SIZE,
            });
        }
        // The row offset must fit in an i64.
        let max_page = (i64::MAX / self.limit).saturating_add(1);
        if self.page > max_page {
            return Err(ValidationError::OutOfRange {
                field: "page".to_string(),
                min: 1,
                max: max_page,
            });
        }
        self.name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        Ok(self)
    }

    #[inline]
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

// =============================================================================
// Checkout Input / Output
// =============================================================================

/// One cart entry submitted for checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutItem {
    pub product_id: i64,
    pub quantity: i64,
}

impl CheckoutItem {
    pub const fn new(product_id: i64, quantity: i64) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

/// A line of a committed checkout, as returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub line_id: String,
    pub product_id: i64,
    pub product_name: String,
    pub unit_price_cents: Money,
    pub quantity: i64,
    pub subtotal_cents: Money,
}

/// Result of a committed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutReceipt {
    pub transaction_id: String,
    pub total_amount_cents: Money,
    pub lines: Vec<ReceiptLine>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Transaction
// =============================================================================

/// A committed sale header. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Transaction {
    pub id: String,
    pub total_amount_cents: i64,
    pub created_at: DateTime<Utc>,
}

/// A line item of a transaction.
///
/// `product_name` and `unit_price_cents` are copied from the product at the
/// time of sale. `product_id` becomes `None` if the product is deleted later;
/// the subtotal never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TransactionLine {
    pub id: String,
    pub transaction_id: String,
    pub product_id: Option<i64>,
    pub product_name: String,
    pub unit_price_cents: i64,
    pub quantity: i64,
    pub subtotal_cents: i64,
}

/// A transaction with all of its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDetail {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub lines: Vec<TransactionLine>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_product_validation_trims_name() {
        let product = NewProduct {
            name: "  Smartphone ".to_string(),
            price_cents: 69_999,
            stock: 50,
            category_id: Some(1),
        }
        .validated()
        .unwrap();
        assert_eq!(product.name, "Smartphone");
    }

    #[test]
    fn test_new_product_rejects_negative_values() {
        let base = NewProduct {
            name: "Laptop".to_string(),
            price_cents: 129_999,
            stock: 20,
            category_id: None,
        };

        let negative_price = NewProduct {
            price_cents: -1,
            ..base.clone()
        };
        assert!(negative_price.validated().is_err());

        let negative_stock = NewProduct {
            stock: -1,
            ..base.clone()
        };
        assert!(negative_stock.validated().is_err());

        let bad_category = NewProduct {
            category_id: Some(0),
            ..base
        };
        assert!(bad_category.validated().is_err());
    }

    #[test]
    fn test_new_category_requires_name() {
        let category = NewCategory {
            name: "   ".to_string(),
            description: None,
        };
        assert!(category.validated().is_err());
    }

    #[test]
    fn test_product_query_paging() {
        let query = ProductQuery {
            name: Some("  phone ".to_string()),
            page: 3,
            limit: 10,
        }
        .validated()
        .unwrap();
        assert_eq!(query.offset(), 20);
        assert_eq!(query.name.as_deref(), Some("phone"));

        let blank = ProductQuery {
            name: Some("   ".to_string()),
            ..ProductQuery::default()
        }
        .validated()
        .unwrap();
        assert_eq!(blank.name, None);
        assert_eq!(blank.offset(), 0);

        assert!(ProductQuery {
            page: 0,
            ..ProductQuery::default()
        }
        .validated()
        .is_err());
        assert!(ProductQuery {
            limit: 1000,
            ..ProductQuery::default()
        }
        .validated()
        .is_err());
    }

    #[test]
    fn test_product_query_rejects_page_past_offset_range() {
        let err = ProductQuery {
            page: i64::MAX,
            limit: 100,
            ..ProductQuery::default()
        }
        .validated()
        .unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { ref field, .. } if field == "page"));

        let last = ProductQuery {
            page: i64::MAX / 100 + 1,
            limit: 100,
            ..ProductQuery::default()
        }
        .validated()
        .unwrap();
        assert_eq!(last.offset(), (i64::MAX / 100) * 100);

        let single = ProductQuery {
            page: i64::MAX,
            limit: 1,
            ..ProductQuery::default()
        }
        .validated()
        .unwrap();
        assert_eq!(single.offset(), i64::MAX - 1);
    }

    #[test]
    fn test_transaction_detail_flattens_header() {
        let detail = TransactionDetail {
            transaction: Transaction {
                id: "t-1".to_string(),
                total_amount_cents: 30_000,
                created_at: Utc::now(),
            },
            lines: Vec::new(),
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["id"], "t-1");
        assert_eq!(json["total_amount_cents"], 30_000);
        assert!(json["lines"].as_array().unwrap().is_empty());
    }
}
