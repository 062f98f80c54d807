//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating line-item sets that hold the
//! bill invariants: positive quantities and no repeated product.

use proptest::prelude::*;

use core_kernel::ProductId;
use domain_billing::{BillProduct, LineItems};

/// Strategy for valid line-item quantities
pub fn quantity_strategy() -> impl Strategy<Value = i32> {
    1i32..10_000
}

/// Strategy for quantities every bill write must reject
pub fn invalid_quantity_strategy() -> impl Strategy<Value = i32> {
    i32::MIN..=0
}

/// Strategy for valid line-item sets drawn from `products`
///
/// Each product appears at most once; the set may be empty.
pub fn line_items_strategy(products: Vec<ProductId>) -> impl Strategy<Value = LineItems> {
    let max = products.len();
    prop::sample::subsequence(products, 0..=max).prop_flat_map(|ids| {
        let len = ids.len();
        prop::collection::vec(quantity_strategy(), len).prop_map(move |quantities| {
            let items = ids
                .iter()
                .zip(quantities)
                .map(|(product, quantity)| BillProduct::new(*product, quantity))
                .collect();
            LineItems::new(items).expect("generated line items are valid")
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn products() -> Vec<ProductId> {
        (1..=5).map(ProductId::new).collect()
    }

    proptest! {
        #[test]
        fn test_line_items_stay_within_products(items in line_items_strategy(products())) {
            prop_assert!(items.len() <= 5);
            for item in &items {
                prop_assert!(products().contains(&item.product));
                prop_assert!(item.quantity > 0);
            }
        }

        #[test]
        fn test_invalid_quantities_fail_validation(quantity in invalid_quantity_strategy()) {
            prop_assert!(BillProduct::new(ProductId::new(1), quantity).validated().is_err());
        }
    }
}
