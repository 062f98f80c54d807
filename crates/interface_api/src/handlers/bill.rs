//! Bill handlers
//!
//! Update and delete answer 200 with a `null` body; creating a bill answers
//! 201 with the stored header.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use core_kernel::{BillId, ProductId};
use domain_billing::{Bill, BillVerbose};
use domain_catalog::Product;

use crate::dto::bill::{BillProductRequest, BillRequest};
use crate::dto::ValidatedJson;
use crate::{error::ApiError, AppState};

/// Lists all bill headers
pub async fn list_bills(State(state): State<AppState>) -> Result<Json<Vec<Bill>>, ApiError> {
    Ok(Json(state.bills.list_bills().await?))
}

/// Gets a bill with its customer and line items
pub async fn get_bill(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BillVerbose>, ApiError> {
    let id: BillId = id.parse()?;
    Ok(Json(state.bills.read_bill_detail(id).await?))
}

/// Creates a bill with its initial line items
pub async fn create_bill(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<BillRequest>,
) -> Result<(StatusCode, Json<Bill>), ApiError> {
    let (customer, items) = request.into_parts()?;
    let bill = state.bills.create_bill(customer, items).await?;
    Ok((StatusCode::CREATED, Json(bill)))
}

/// Replaces a bill's customer and its whole line-item set
pub async fn update_bill(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<BillRequest>,
) -> Result<Json<()>, ApiError> {
    let id: BillId = id.parse()?;
    let (customer, items) = request.into_parts()?;
    state.bills.replace_bill_contents(id, customer, items).await?;
    Ok(Json(()))
}

/// Deletes a bill and its line items
pub async fn delete_bill(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<()>, ApiError> {
    let id: BillId = id.parse()?;
    state.bills.delete_bill(id).await?;
    Ok(Json(()))
}

/// Lists the products on a bill
pub async fn list_bill_products(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let id: BillId = id.parse()?;
    Ok(Json(state.bills.list_bill_products(id).await?))
}

/// Adds one line item to a bill
pub async fn add_bill_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<BillProductRequest>,
) -> Result<(StatusCode, Json<()>), ApiError> {
    let id: BillId = id.parse()?;
    state.bills.add_line_item(id, request.into_item()).await?;
    Ok((StatusCode::CREATED, Json(())))
}

/// Removes a product's line item from a bill
pub async fn remove_bill_product(
    State(state): State<AppState>,
    Path((bill_id, product_id)): Path<(String, String)>,
) -> Result<Json<()>, ApiError> {
    let bill_id: BillId = bill_id.parse()?;
    let product_id: ProductId = product_id.parse()?;
    state.bills.remove_line_item(bill_id, product_id).await?;
    Ok(Json(()))
}
