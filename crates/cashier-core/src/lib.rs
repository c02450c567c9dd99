//! # cashier-core: Pure Business Logic for the Cashier Backend
//!
//! This crate holds every rule of the point-of-sale backend that can be
//! expressed without touching a database or the network.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cashier Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  apps/cashier-api (axum)                        │   │
//! │  │   /api/products  /api/categories  /api/checkout  /api/report   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    cashier-db (SQLite)                          │   │
//! │  │   repositories, unit of work, checkout orchestrator, reports   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ cashier-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌────────┐ │   │
//! │  │   │  types  │ │  money  │ │ pricing │ │ checkout │ │ report │ │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └──────────┘ └────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, Transaction, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Line subtotals and cart totals
//! - [`checkout`] - Checkout state machine, lock modes, cart normalization
//! - [`report`] - Report windows and sales summary types
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use cashier_core::money::Money;
//! use cashier_core::pricing::{price_cart, PriceInput};
//!
//! let smartphone = Money::from_decimal_str("699.99").unwrap();
//! let cart = price_cart(&[PriceInput::new(1, smartphone, 3)]).unwrap();
//!
//! assert_eq!(cart.total, Money::from_cents(209_997));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod money;
pub mod pricing;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::{CheckoutState, LockMode};
pub use error::{CheckoutError, CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use report::{BestSellingProduct, ReportWindow, SalesSummary};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default page size for catalog listings.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Largest page a catalog listing may request.
pub const MAX_PAGE_SIZE: i64 = 100;
