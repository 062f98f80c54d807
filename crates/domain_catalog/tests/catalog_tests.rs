//! Tests for the catalog domain against the in-memory ports

use core_kernel::{CustomerId, ProductId};
use domain_catalog::ports::mock::MockCatalog;
use domain_catalog::{CustomerInput, CustomerPort, ProductInput, ProductPort};

// ============================================================================
// Product Tests
// ============================================================================

mod product_tests {
    use super::*;

    fn tea() -> ProductInput {
        ProductInput::new("Test Product", "Description of test product", 100000, 100000)
    }

    #[tokio::test]
    async fn test_product_lifecycle() {
        let catalog = MockCatalog::new();

        let product = catalog.create_product(tea()).await.unwrap();
        assert_eq!(product.name, "Test Product");
        assert_eq!(product.price, 100000);

        let fetched = catalog.get_product(product.id).await.unwrap();
        assert_eq!(fetched, product);

        let listed = catalog.list_products().await.unwrap();
        assert!(listed.iter().any(|p| p.id == product.id));

        catalog
            .update_product(
                product.id,
                ProductInput::new("Updated Test Product", "Updated Description", 50000, 50000),
            )
            .await
            .unwrap();
        let updated = catalog.get_product(product.id).await.unwrap();
        assert_eq!(updated.name, "Updated Test Product");
        assert_eq!(updated.quantity, 50000);

        catalog.delete_product(product.id).await.unwrap();
        let err = catalog.get_product(product.id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_fields() {
        let catalog = MockCatalog::new();
        let err = catalog
            .create_product(ProductInput::new("Tea", "Green tea", -1, 5))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert!(catalog.list_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_unknown_product_is_not_found() {
        let catalog = MockCatalog::new();
        let err = catalog.update_product(ProductId::new(99), tea()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_unknown_product_is_not_found() {
        let catalog = MockCatalog::new();
        let err = catalog.delete_product(ProductId::new(99)).await.unwrap_err();
        assert!(err.is_not_found());
    }
}

// ============================================================================
// Customer Tests
// ============================================================================

mod customer_tests {
    use super::*;

    #[tokio::test]
    async fn test_customer_lifecycle() {
        let catalog = MockCatalog::new();

        let customer = catalog
            .create_customer(CustomerInput::new("Test name", "Test last name"))
            .await
            .unwrap();
        assert_eq!(catalog.get_customer(customer.id).await.unwrap(), customer);

        catalog
            .update_customer(customer.id, CustomerInput::new("Updated", "Name"))
            .await
            .unwrap();
        assert_eq!(catalog.get_customer(customer.id).await.unwrap().first_name, "Updated");

        catalog.delete_customer(customer.id).await.unwrap();
        assert!(catalog.get_customer(customer.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_held_customer_cannot_be_deleted() {
        let catalog = MockCatalog::new();
        let customer = catalog
            .create_customer(CustomerInput::new("Ada", "Lovelace"))
            .await
            .unwrap();

        assert!(catalog.try_hold_customer(customer.id).await);
        assert!(catalog.try_hold_customer(customer.id).await);
        catalog.release_customer(customer.id).await;

        assert!(catalog.delete_customer(customer.id).await.unwrap_err().is_conflict());
    }

    #[tokio::test]
    async fn test_get_unknown_customer_message() {
        let catalog = MockCatalog::new();
        let err = catalog.get_customer(CustomerId::new(4)).await.unwrap_err();
        assert_eq!(err.to_string(), "Customer with passed id:4 not exists");
    }
}
