//! # HTTP Routes
//!
//! ```text
//! GET    /health
//! GET    /api/categories            POST /api/categories
//! GET    /api/categories/{id}       PUT  /api/categories/{id}    DELETE
//! GET    /api/products              POST /api/products
//! GET    /api/products/{id}         PUT  /api/products/{id}      DELETE
//! POST   /api/checkout
//! GET    /api/transactions/{id}
//! GET    /api/report/today
//! GET    /api/report?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD
//! ```

pub mod categories;
pub mod checkout;
pub mod health;
pub mod products;
pub mod reports;
pub mod transactions;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/api/categories",
            get(categories::list).post(categories::create),
        )
        .route(
            "/api/categories/{id}",
            get(categories::get)
                .put(categories::update)
                .delete(categories::delete),
        )
        .route("/api/products", get(products::list).post(products::create))
        .route(
            "/api/products/{id}",
            get(products::get)
                .put(products::update)
                .delete(products::delete),
        )
        .route("/api/checkout", post(checkout::checkout))
        .route("/api/transactions/{id}", get(transactions::get))
        .route("/api/report/today", get(reports::today))
        .route("/api/report", get(reports::range))
        .with_state(state)
}
