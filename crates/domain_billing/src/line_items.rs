//! Validated line-item sets
//!
//! `LineItems` can only be built through `LineItems::new`, which enforces the
//! invariants every bill write relies on: quantities are strictly positive
//! and each product appears at most once.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use core_kernel::ProductId;

use crate::bill::BillProduct;
use crate::error::BillingError;

/// An ordered, duplicate-free set of line items with positive quantities
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LineItems(Vec<BillProduct>);

impl LineItems {
    /// Validates the items, keeping their request order
    ///
    /// # Errors
    ///
    /// * `BillingError::InvalidQuantity` for the first non-positive quantity
    /// * `BillingError::DuplicateProduct` for the first repeated product id
    pub fn new(items: Vec<BillProduct>) -> Result<Self, BillingError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            item.validated()?;
            if !seen.insert(item.product) {
                return Err(BillingError::DuplicateProduct(item.product));
            }
        }
        Ok(Self(items))
    }

    /// An empty set; bills may be created without items
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BillProduct> {
        self.0.iter()
    }

    /// Product ids in request order
    pub fn product_ids(&self) -> Vec<ProductId> {
        self.0.iter().map(|item| item.product).collect()
    }

    pub fn into_inner(self) -> Vec<BillProduct> {
        self.0
    }
}

impl<'a> IntoIterator for &'a LineItems {
    type Item = &'a BillProduct;
    type IntoIter = std::slice::Iter<'a, BillProduct>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl TryFrom<Vec<BillProduct>> for LineItems {
    type Error = BillingError;

    fn try_from(items: Vec<BillProduct>) -> Result<Self, Self::Error> {
        Self::new(items)
    }
}

/// Returns the requested product ids absent from `found`, sorted and deduplicated
///
/// Storage adapters query the existing ids for a request and use this to name
/// exactly which references failed to resolve.
pub fn missing_products(requested: &[ProductId], found: &[ProductId]) -> Vec<ProductId> {
    let found: HashSet<ProductId> = found.iter().copied().collect();
    requested
        .iter()
        .filter(|id| !found.contains(id))
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Error text for a product reference check that failed on `missing`
pub fn missing_products_message(missing: &[ProductId]) -> String {
    let ids: Vec<String> = missing.iter().map(ToString::to_string).collect();
    format!("not all passed products exists, missing ids: {}", ids.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product: i32, quantity: i32) -> BillProduct {
        BillProduct::new(ProductId::new(product), quantity)
    }

    #[test]
    fn test_accepts_unique_positive_items() {
        let items = LineItems::new(vec![item(1, 10), item(2, 5)]).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items.product_ids(), vec![ProductId::new(1), ProductId::new(2)]);
    }

    #[test]
    fn test_rejects_zero_quantity() {
        let err = LineItems::new(vec![item(1, 0)]).unwrap_err();
        assert_eq!(
            err,
            BillingError::InvalidQuantity { product: ProductId::new(1), quantity: 0 }
        );
    }

    #[test]
    fn test_rejects_duplicate_product() {
        let err = LineItems::new(vec![item(1, 1), item(2, 1), item(1, 3)]).unwrap_err();
        assert_eq!(err, BillingError::DuplicateProduct(ProductId::new(1)));
    }

    #[test]
    fn test_empty_is_allowed() {
        assert!(LineItems::new(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_products_names_each_absent_id_once() {
        let requested = [ProductId::new(3), ProductId::new(1), ProductId::new(7)];
        let found = [ProductId::new(1)];
        assert_eq!(
            missing_products(&requested, &found),
            vec![ProductId::new(3), ProductId::new(7)]
        );
    }

    #[test]
    fn test_missing_products_message_lists_ids() {
        let message = missing_products_message(&[ProductId::new(3), ProductId::new(7)]);
        assert_eq!(message, "not all passed products exists, missing ids: 3, 7");
    }
}
