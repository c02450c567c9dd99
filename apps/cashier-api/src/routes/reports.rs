//! Sales summaries.
//!
//! Days are UTC calendar days; a range includes both end dates.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use cashier_core::{ReportWindow, SalesSummary, ValidationError};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::state::AppState;

/// `start_date` and `end_date` as `YYYY-MM-DD`.
#[derive(Debug, Deserialize)]
pub struct RangeParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// `GET /api/report/today`
pub async fn today(State(state): State<AppState>) -> ApiResult<Json<SalesSummary>> {
    Ok(Json(state.db.reports().sales_summary(ReportWindow::Today).await?))
}

/// `GET /api/report?start_date=&end_date=`
pub async fn range(
    State(state): State<AppState>,
    params: Result<Query<RangeParams>, QueryRejection>,
) -> ApiResult<Json<SalesSummary>> {
    let Query(params) = params?;
    let start = params.start_date.ok_or_else(|| required("start_date"))?;
    let end = params.end_date.ok_or_else(|| required("end_date"))?;

    let window = ReportWindow::parse_range(&start, &end)?;
    Ok(Json(state.db.reports().sales_summary(window).await?))
}

fn required(field: &str) -> ValidationError {
    ValidationError::Required {
        field: field.to_string(),
    }
}
