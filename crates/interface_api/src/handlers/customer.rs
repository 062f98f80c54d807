//! Customer handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use core_kernel::CustomerId;
use domain_catalog::Customer;

use crate::dto::customer::CustomerRequest;
use crate::dto::ValidatedJson;
use crate::{error::ApiError, AppState};

pub async fn list_customers(State(state): State<AppState>) -> Result<Json<Vec<Customer>>, ApiError> {
    Ok(Json(state.customers.list_customers().await?))
}

pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Customer>, ApiError> {
    let id: CustomerId = id.parse()?;
    Ok(Json(state.customers.get_customer(id).await?))
}

pub async fn create_customer(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CustomerRequest>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    let customer = state.customers.create_customer(request.into_input()).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<CustomerRequest>,
) -> Result<Json<()>, ApiError> {
    let id: CustomerId = id.parse()?;
    state.customers.update_customer(id, request.into_input()).await?;
    Ok(Json(()))
}

pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<()>, ApiError> {
    let id: CustomerId = id.parse()?;
    state.customers.delete_customer(id).await?;
    Ok(Json(()))
}
