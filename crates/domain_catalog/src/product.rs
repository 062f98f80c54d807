//! Product entity
//!
//! Prices are kept in the smallest currency unit, so both price and stock
//! quantity are plain positive integers.

use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::ProductId;

use crate::error::CatalogError;

/// A product that can be placed on bills
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Unit price in the smallest currency unit
    pub price: i32,
    /// Units in stock
    pub quantity: i32,
}

impl Product {
    /// Builds a product from its stored id and the fields it was created with
    pub fn from_input(id: ProductId, input: ProductInput) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            quantity: input.quantity,
        }
    }
}

/// Fields supplied when creating or updating a product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ProductInput {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(range(min = 1))]
    pub price: i32,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

impl ProductInput {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: i32,
        quantity: i32,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
            quantity,
        }
    }

    /// Runs the field rules and returns the input unchanged when they pass
    pub fn validated(self) -> Result<Self, CatalogError> {
        self.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input_passes() {
        let input = ProductInput::new("Tea", "Green tea", 350, 40);
        assert!(input.validated().is_ok());
    }

    #[test]
    fn test_non_positive_price_rejected() {
        let err = ProductInput::new("Tea", "Green tea", 0, 40).validated().unwrap_err();
        assert!(err.to_string().contains("price"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = ProductInput::new("", "Green tea", 350, 40).validated().unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn test_from_input_keeps_fields() {
        let product = Product::from_input(ProductId::new(3), ProductInput::new("Tea", "Green tea", 350, 40));
        assert_eq!(product.id, ProductId::new(3));
        assert_eq!(product.price, 350);
        assert_eq!(product.quantity, 40);
    }
}
