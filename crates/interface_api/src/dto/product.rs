//! Product DTOs

use serde::Deserialize;
use validator::Validate;

use domain_catalog::ProductInput;

/// Body of `POST /product` and `PATCH /product/:id`
#[derive(Debug, Deserialize, Validate)]
pub struct ProductRequest {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(required, length(min = 1))]
    pub description: Option<String>,
    #[validate(required, range(min = 1))]
    pub price: Option<i32>,
    #[validate(required, range(min = 1))]
    pub quantity: Option<i32>,
}

impl ProductRequest {
    /// Converts a validated request into the domain input
    pub fn into_input(self) -> ProductInput {
        ProductInput::new(
            self.name.unwrap_or_default(),
            self.description.unwrap_or_default(),
            self.price.unwrap_or_default(),
            self.quantity.unwrap_or_default(),
        )
    }
}
