//! # cashier-api: HTTP Binding for the Cashier Backend
//!
//! JSON routes over [`cashier_db`]: catalog CRUD, checkout, transaction
//! lookup and sales reports.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP request                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  routes::*  ── extract + validate (cashier-core) ──┐                   │
//! │       │                                             │ error             │
//! │       ▼                                             ▼                   │
//! │  AppState.db / AppState.checkout()              ApiError → JSON body   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite (cashier-db)                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::router;
pub use state::AppState;
