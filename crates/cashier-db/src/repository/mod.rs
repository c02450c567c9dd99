//! # Repository Module
//!
//! Pool-backed repositories for everything outside the checkout unit of work.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.products().list(&query)                                    │
//! │       ▼                                                                 │
//! │  ProductRepository / CategoryRepository     catalog CRUD               │
//! │  TransactionRepository                      read-only sales history    │
//! │  ReportRepository                           sales summaries            │
//! │       │                                                                 │
//! │       │  SQL                                                           │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Writes to `transactions` and `transaction_lines` only happen through
//! [`crate::checkout`]; the repositories here never insert sales.

pub mod category;
pub mod product;
pub mod report;
pub mod transaction;
