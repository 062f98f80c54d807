//! Catalog Domain Ports
//!
//! `ProductPort` and `CustomerPort` define what the HTTP layer and the billing
//! domain need from catalog storage. The PostgreSQL adapters live in
//! `infra_db`; the in-memory `mock` module backs unit and HTTP tests.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_catalog::ports::ProductPort;
//! use std::sync::Arc;
//!
//! let products: Arc<dyn ProductPort> = Arc::new(PostgresProductAdapter::new(pool));
//! let all = products.list_products().await?;
//! ```

use async_trait::async_trait;

use core_kernel::{CustomerId, DomainPort, HealthCheckable, PortError, ProductId};

use crate::customer::{Customer, CustomerInput};
use crate::product::{Product, ProductInput};

/// Storage operations for products
#[async_trait]
pub trait ProductPort: DomainPort + HealthCheckable {
    /// Lists every product ordered by id
    async fn list_products(&self) -> Result<Vec<Product>, PortError>;

    /// Retrieves a product by ID
    ///
    /// # Returns
    ///
    /// The product if found, or `PortError::NotFound`
    async fn get_product(&self, id: ProductId) -> Result<Product, PortError>;

    /// Stores a new product and returns it with its generated id
    async fn create_product(&self, input: ProductInput) -> Result<Product, PortError>;

    /// Overwrites every field of an existing product
    async fn update_product(&self, id: ProductId, input: ProductInput) -> Result<(), PortError>;

    /// Deletes a product
    ///
    /// # Errors
    ///
    /// `PortError::NotFound` when absent, `PortError::Conflict` while a bill
    /// line item still references it
    async fn delete_product(&self, id: ProductId) -> Result<(), PortError>;
}

/// Storage operations for customers
#[async_trait]
pub trait CustomerPort: DomainPort + HealthCheckable {
    /// Lists every customer ordered by id
    async fn list_customers(&self) -> Result<Vec<Customer>, PortError>;

    /// Retrieves a customer by ID
    async fn get_customer(&self, id: CustomerId) -> Result<Customer, PortError>;

    /// Stores a new customer and returns it with its generated id
    async fn create_customer(&self, input: CustomerInput) -> Result<Customer, PortError>;

    /// Overwrites the names of an existing customer
    async fn update_customer(&self, id: CustomerId, input: CustomerInput) -> Result<(), PortError>;

    /// Deletes a customer; `PortError::Conflict` while bills reference it
    async fn delete_customer(&self, id: CustomerId) -> Result<(), PortError>;
}

/// In-memory implementation of the catalog ports for testing
///
/// Ids are handed out from a counter starting at 1, like a `SERIAL` column.
/// Reference counts stand in for foreign keys: the billing mock holds a
/// product or customer while a bill uses it, and deleting a held entity fails
/// with `PortError::Conflict`.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::atomic::{AtomicI32, Ordering};
    use tokio::sync::RwLock;

    use core_kernel::HealthCheckResult;

    /// In-memory catalog backing both `ProductPort` and `CustomerPort`
    #[derive(Debug, Default)]
    pub struct MockCatalog {
        products: RwLock<BTreeMap<ProductId, Product>>,
        customers: RwLock<BTreeMap<CustomerId, Customer>>,
        product_holds: RwLock<HashMap<ProductId, usize>>,
        customer_holds: RwLock<HashMap<CustomerId, usize>>,
        next_product_id: AtomicI32,
        next_customer_id: AtomicI32,
    }

    impl MockCatalog {
        /// Creates an empty catalog
        pub fn new() -> Self {
            Self::default()
        }

        /// Returns true when the product exists
        pub async fn has_product(&self, id: ProductId) -> bool {
            self.products.read().await.contains_key(&id)
        }

        /// Returns true when the customer exists
        pub async fn has_customer(&self, id: CustomerId) -> bool {
            self.customers.read().await.contains_key(&id)
        }

        /// Marks an existing product as referenced by one more line item
        ///
        /// Returns false, holding nothing, when the product does not exist.
        /// The existence check and the hold happen under the holds lock that
        /// `delete_product` also takes first, so a delete cannot slip between.
        pub async fn try_hold_product(&self, id: ProductId) -> bool {
            let mut holds = self.product_holds.write().await;
            if !self.products.read().await.contains_key(&id) {
                return false;
            }
            *holds.entry(id).or_insert(0) += 1;
            true
        }

        /// Drops one line-item reference to the product
        pub async fn release_product(&self, id: ProductId) {
            release(&mut *self.product_holds.write().await, id);
        }

        /// Marks an existing customer as referenced by one more bill
        pub async fn try_hold_customer(&self, id: CustomerId) -> bool {
            let mut holds = self.customer_holds.write().await;
            if !self.customers.read().await.contains_key(&id) {
                return false;
            }
            *holds.entry(id).or_insert(0) += 1;
            true
        }

        /// Drops one bill reference to the customer
        pub async fn release_customer(&self, id: CustomerId) {
            release(&mut *self.customer_holds.write().await, id);
        }
    }

    fn release<K: std::hash::Hash + Eq>(holds: &mut HashMap<K, usize>, id: K) {
        if let Some(count) = holds.get_mut(&id) {
            *count -= 1;
            if *count == 0 {
                holds.remove(&id);
            }
        }
    }

    impl DomainPort for MockCatalog {}

    #[async_trait]
    impl HealthCheckable for MockCatalog {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::healthy("mock-catalog", 0)
        }
    }

    #[async_trait]
    impl ProductPort for MockCatalog {
        async fn list_products(&self) -> Result<Vec<Product>, PortError> {
            Ok(self.products.read().await.values().cloned().collect())
        }

        async fn get_product(&self, id: ProductId) -> Result<Product, PortError> {
            self.products
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Product", id))
        }

        async fn create_product(&self, input: ProductInput) -> Result<Product, PortError> {
            let input = input.validated()?;
            let id = ProductId::new(self.next_product_id.fetch_add(1, Ordering::SeqCst) + 1);
            let product = Product::from_input(id, input);
            self.products.write().await.insert(id, product.clone());
            Ok(product)
        }

        async fn update_product(&self, id: ProductId, input: ProductInput) -> Result<(), PortError> {
            let input = input.validated()?;
            let mut products = self.products.write().await;
            let product = products
                .get_mut(&id)
                .ok_or_else(|| PortError::not_found("Product", id))?;
            *product = Product::from_input(id, input);
            Ok(())
        }

        async fn delete_product(&self, id: ProductId) -> Result<(), PortError> {
            let holds = self.product_holds.read().await;
            if holds.contains_key(&id) {
                return Err(PortError::conflict("Product is referenced by existing bills"));
            }
            self.products
                .write()
                .await
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| PortError::not_found("Product", id))
        }
    }

    #[async_trait]
    impl CustomerPort for MockCatalog {
        async fn list_customers(&self) -> Result<Vec<Customer>, PortError> {
            Ok(self.customers.read().await.values().cloned().collect())
        }

        async fn get_customer(&self, id: CustomerId) -> Result<Customer, PortError> {
            self.customers
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Customer", id))
        }

        async fn create_customer(&self, input: CustomerInput) -> Result<Customer, PortError> {
            let input = input.validated()?;
            let id = CustomerId::new(self.next_customer_id.fetch_add(1, Ordering::SeqCst) + 1);
            let customer = Customer::from_input(id, input);
            self.customers.write().await.insert(id, customer.clone());
            Ok(customer)
        }

        async fn update_customer(&self, id: CustomerId, input: CustomerInput) -> Result<(), PortError> {
            let input = input.validated()?;
            let mut customers = self.customers.write().await;
            let customer = customers
                .get_mut(&id)
                .ok_or_else(|| PortError::not_found("Customer", id))?;
            *customer = Customer::from_input(id, input);
            Ok(())
        }

        async fn delete_customer(&self, id: CustomerId) -> Result<(), PortError> {
            let holds = self.customer_holds.read().await;
            if holds.contains_key(&id) {
                return Err(PortError::conflict("Customer is referenced by existing bills"));
            }
            self.customers
                .write()
                .await
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| PortError::not_found("Customer", id))
        }
    }
}
