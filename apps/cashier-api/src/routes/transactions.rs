//! `GET /api/transactions/{id}`

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;
use cashier_core::{validation::validate_transaction_id, CoreError, TransactionDetail};

use crate::error::ApiResult;
use crate::state::AppState;

pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<TransactionDetail>> {
    let Path(id) = id?;
    validate_transaction_id(&id)?;

    let detail = state
        .db
        .transactions()
        .get_detail(&id)
        .await?
        .ok_or(CoreError::TransactionNotFound(id))?;

    Ok(Json(detail))
}
