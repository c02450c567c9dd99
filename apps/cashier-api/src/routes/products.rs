//! `/api/products` CRUD and listing.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cashier_core::{validation::validate_id, CoreError, NewProduct, Product, ProductQuery};
use tracing::info;

use crate::error::ApiResult;
use crate::state::AppState;

/// `GET /api/products?name=&page=&limit=`
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Product>>> {
    let Query(query) = query?;
    let query = query.validated()?;

    Ok(Json(state.db.products().list(&query).await?))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<NewProduct>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let Json(input) = body?;
    let input = input.validated()?;

    let product = state.db.products().insert(&input).await?;
    info!(id = product.id, name = %product.name, price = %product.price(), "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Product>> {
    let Path(id) = id?;
    validate_id("id", id)?;

    let product = state
        .db
        .products()
        .get_by_id(id)
        .await?
        .ok_or(CoreError::ProductNotFound(id))?;

    Ok(Json(product))
}

/// Replaces name, price, stock and category.
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<NewProduct>, JsonRejection>,
) -> ApiResult<Json<Product>> {
    let Path(id) = id?;
    validate_id("id", id)?;
    let Json(input) = body?;
    let input = input.validated()?;

    Ok(Json(state.db.products().update(id, &input).await?))
}

/// Past transaction lines keep their snapshot of the product.
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    validate_id("id", id)?;

    state.db.products().delete(id).await?;
    info!(id, "Product deleted");

    Ok(StatusCode::NO_CONTENT)
}
