//! Billing domain errors

use core_kernel::{PortError, ProductId};
use thiserror::Error;

/// Errors raised while validating bill input, before any storage access
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BillingError {
    /// A line item carries a zero or negative quantity
    #[error("Quantity of product {product} must be positive, got {quantity}")]
    InvalidQuantity {
        product: ProductId,
        quantity: i32,
    },

    /// The same product appears more than once in one request
    #[error("Product {0} is passed more than once")]
    DuplicateProduct(ProductId),
}

impl From<BillingError> for PortError {
    fn from(error: BillingError) -> Self {
        let field = match &error {
            BillingError::InvalidQuantity { .. } => "quantity",
            BillingError::DuplicateProduct(_) => "product",
        };
        PortError::validation_field(error.to_string(), field)
    }
}
