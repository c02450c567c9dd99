//! `/api/categories` CRUD.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use cashier_core::{validation::validate_id, Category, CoreError, NewCategory};
use tracing::info;

use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(state.db.categories().list().await?))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<NewCategory>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let Json(input) = body?;
    let input = input.validated()?;

    let category = state.db.categories().insert(&input).await?;
    info!(id = category.id, name = %category.name, "Category created");

    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Category>> {
    let Path(id) = id?;
    validate_id("id", id)?;

    let category = state
        .db
        .categories()
        .get_by_id(id)
        .await?
        .ok_or(CoreError::CategoryNotFound(id))?;

    Ok(Json(category))
}

pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<NewCategory>, JsonRejection>,
) -> ApiResult<Json<Category>> {
    let Path(id) = id?;
    validate_id("id", id)?;
    let Json(input) = body?;
    let input = input.validated()?;

    Ok(Json(state.db.categories().update(id, &input).await?))
}

/// Products in the category are kept, without a category.
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    validate_id("id", id)?;

    state.db.categories().delete(id).await?;
    info!(id, "Category deleted");

    Ok(StatusCode::NO_CONTENT)
}
