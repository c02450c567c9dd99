//! # cashier-db: Database Layer for the Cashier Backend
//!
//! SQLite storage via sqlx, plus the checkout engine that needs a store to
//! run against.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cashier Data Flow                                │
//! │                                                                         │
//! │  HTTP handler (POST /api/checkout)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    cashier-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │   Checkout    │    │ Repositories │  │   │
//! │  │   │   (pool.rs)   │    │  (checkout/)  │    │ (repository/)│  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ Orchestrator  │    │ Category     │  │   │
//! │  │   │ Migrations    │    │ Inventory     │    │ Product      │  │   │
//! │  │   │               │    │ Writer        │    │ Transaction  │  │   │
//! │  │   │               │    │ (unit of work)│    │ Report       │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (WAL)                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`unit_of_work`] - Transaction boundary used by checkout
//! - [`checkout`] - Checkout orchestrator, inventory store, transaction writer
//! - [`repository`] - Catalog, history and report repositories
//! - [`seed`] - Starter catalog
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cashier_core::{CheckoutItem, LockMode, ReportWindow};
//! use cashier_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/cashier.db")).await?;
//!
//! let receipt = db
//!     .checkout()
//!     .checkout(&[CheckoutItem::new(1, 2)], LockMode::Pessimistic)
//!     .await?;
//!
//! let today = db.reports().sales_summary(ReportWindow::Today).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;
pub mod unit_of_work;

// =============================================================================
// Re-exports
// =============================================================================

pub use checkout::{CheckoutAttempt, CheckoutService};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use unit_of_work::{SqliteStore, UnitOfWork, UnitOfWorkFactory};

// Repository re-exports for convenience
pub use repository::category::CategoryRepository;
pub use repository::product::ProductRepository;
pub use repository::report::ReportRepository;
pub use repository::transaction::TransactionRepository;
