//! Customer entity

use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::CustomerId;

use crate::error::CatalogError;

/// A customer that bills are issued to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
}

impl Customer {
    /// Builds a customer from its stored id and the fields it was created with
    pub fn from_input(id: CustomerId, input: CustomerInput) -> Self {
        Self {
            id,
            first_name: input.first_name,
            last_name: input.last_name,
        }
    }

    /// Returns "first last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Fields supplied when creating or updating a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CustomerInput {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
}

impl CustomerInput {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
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
    fn test_full_name() {
        let customer = Customer::from_input(CustomerId::new(1), CustomerInput::new("Ada", "Lovelace"));
        assert_eq!(customer.full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_blank_last_name_rejected() {
        assert!(CustomerInput::new("Ada", "").validated().is_err());
    }
}
