//! Bill entities and the composed read view

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::{BillId, CustomerId, ProductId};
use domain_catalog::Customer;

use crate::error::BillingError;

/// Bill header as stored
///
/// `number` and `created_at` are assigned once at creation and never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub id: BillId,
    pub number: Uuid,
    pub created_at: DateTime<Utc>,
    pub customer: CustomerId,
}

/// One product-quantity pairing within a bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BillProduct {
    pub product: ProductId,
    pub quantity: i32,
}

impl BillProduct {
    pub fn new(product: ProductId, quantity: i32) -> Self {
        Self { product, quantity }
    }

    /// Returns the item unchanged when its quantity is strictly positive
    pub fn validated(self) -> Result<Self, BillingError> {
        if self.quantity <= 0 {
            return Err(BillingError::InvalidQuantity {
                product: self.product,
                quantity: self.quantity,
            });
        }
        Ok(self)
    }
}

/// Fully resolved bill: header, customer and line items ordered by product id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillVerbose {
    pub id: BillId,
    pub number: Uuid,
    pub created_at: DateTime<Utc>,
    pub customer: Customer,
    pub products: Vec<BillProduct>,
}

impl BillVerbose {
    /// Returns the header part of the view
    pub fn header(&self) -> Bill {
        Bill {
            id: self.id,
            number: self.number,
            created_at: self.created_at,
            customer: self.customer.id,
        }
    }

    /// Returns the quantity billed for a product, if present
    pub fn quantity_of(&self, product: ProductId) -> Option<i32> {
        self.products
            .iter()
            .find(|item| item.product == product)
            .map(|item| item.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_serializes_nested_customer() {
        let verbose = BillVerbose {
            id: BillId::new(1),
            number: Uuid::nil(),
            created_at: Utc::now(),
            customer: Customer {
                id: CustomerId::new(2),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
            },
            products: vec![BillProduct::new(ProductId::new(3), 4)],
        };

        let json = serde_json::to_value(&verbose).unwrap();
        assert_eq!(json["customer"]["first_name"], "Ada");
        assert_eq!(json["products"][0]["product"], 3);
        assert_eq!(json["products"][0]["quantity"], 4);
        assert_eq!(verbose.header().customer, CustomerId::new(2));
    }
}
