//! Bill DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{CustomerId, PortError, ProductId};
use domain_billing::{BillProduct, LineItems};

/// One line item in a request body
///
/// `Serialize` lets a failed `required` check on the list echo its value.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct BillProductRequest {
    #[validate(required)]
    pub product: Option<i32>,
    #[validate(required, range(min = 1))]
    pub quantity: Option<i32>,
}

impl BillProductRequest {
    pub fn into_item(self) -> BillProduct {
        BillProduct::new(
            ProductId::new(self.product.unwrap_or_default()),
            self.quantity.unwrap_or_default(),
        )
    }
}

/// Body of `POST /bill` and `PATCH /bill/:id`
#[derive(Debug, Deserialize, Validate)]
pub struct BillRequest {
    #[validate(required)]
    pub customer: Option<i32>,
    #[validate(required, nested)]
    pub products: Option<Vec<BillProductRequest>>,
}

impl BillRequest {
    /// Splits a validated request into the customer and a checked line-item set
    ///
    /// # Errors
    ///
    /// `PortError::Validation` when a product id repeats
    pub fn into_parts(self) -> Result<(CustomerId, LineItems), PortError> {
        let customer = CustomerId::new(self.customer.unwrap_or_default());
        let items = self
            .products
            .unwrap_or_default()
            .into_iter()
            .map(BillProductRequest::into_item)
            .collect();
        Ok((customer, LineItems::new(items)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: serde_json::Value) -> BillRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_missing_products_fails_validation() {
        let req = request(serde_json::json!({ "customer": 1 }));
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("products"));
    }

    #[test]
    fn test_nested_quantity_is_validated() {
        let req = request(serde_json::json!({
            "customer": 1,
            "products": [{ "product": 1, "quantity": 0 }]
        }));
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_duplicate_products_rejected_on_conversion() {
        let req = request(serde_json::json!({
            "customer": 1,
            "products": [{ "product": 2, "quantity": 1 }, { "product": 2, "quantity": 3 }]
        }));
        assert!(req.validate().is_ok());
        assert!(req.into_parts().unwrap_err().is_validation());
    }

    #[test]
    fn test_empty_products_allowed() {
        let req = request(serde_json::json!({ "customer": 4, "products": [] }));
        assert!(req.validate().is_ok());
        let (customer, items) = req.into_parts().unwrap();
        assert_eq!(customer, CustomerId::new(4));
        assert!(items.is_empty());
    }
}
