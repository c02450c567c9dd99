//! `POST /api/checkout`

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cashier_core::{CheckoutItem, CheckoutReceipt, LockMode};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::state::AppState;

/// Wire form of a checkout.
///
/// `use_lock` selects pessimistic locking; omitted means optimistic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutItem>,
    #[serde(default)]
    pub use_lock: bool,
}

pub async fn checkout(
    State(state): State<AppState>,
    body: Result<Json<CheckoutRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CheckoutReceipt>)> {
    let Json(request) = body?;

    let receipt = state
        .checkout()
        .checkout(&request.items, LockMode::from(request.use_lock))
        .await?;

    Ok((StatusCode::CREATED, Json(receipt)))
}
