//! Product handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use core_kernel::ProductId;
use domain_catalog::Product;

use crate::dto::product::ProductRequest;
use crate::dto::ValidatedJson;
use crate::{error::ApiError, AppState};

/// Lists all products
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.products.list_products().await?))
}

/// Gets a product by ID
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id: ProductId = id.parse()?;
    Ok(Json(state.products.get_product(id).await?))
}

/// Creates a product
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ProductRequest>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = state.products.create_product(request.into_input()).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Overwrites a product
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<ProductRequest>,
) -> Result<Json<()>, ApiError> {
    let id: ProductId = id.parse()?;
    state.products.update_product(id, request.into_input()).await?;
    Ok(Json(()))
}

/// Deletes a product
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<()>, ApiError> {
    let id: ProductId = id.parse()?;
    state.products.delete_product(id).await?;
    Ok(Json(()))
}
