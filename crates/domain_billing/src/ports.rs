//! Billing Domain Ports
//!
//! `BillPort` is the bill writer: it owns the create, replace and delete
//! lifecycle of a bill together with its line items, and guarantees that
//! every customer and product reference resolves.
//!
//! Implementations:
//!
//! - **PostgreSQL adapter** (`infra_db::PostgresBillAdapter`): runs each
//!   bill mutation in one transaction with validation queries inside it
//! - **Mock adapter** (`mock::MockBillPort`): in-memory, backed by
//!   `domain_catalog::ports::mock::MockCatalog`
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_billing::{BillPort, LineItems};
//! use std::sync::Arc;
//!
//! let bills: Arc<dyn BillPort> = Arc::new(PostgresBillAdapter::new(pool));
//! bills.replace_bill_contents(bill_id, customer_id, LineItems::empty()).await?;
//! ```

use async_trait::async_trait;

use core_kernel::{BillId, CustomerId, DomainPort, HealthCheckable, PortError, ProductId};
use domain_catalog::Product;

use crate::bill::{Bill, BillProduct, BillVerbose};
use crate::line_items::LineItems;

/// The bill writer port
///
/// All mutations either apply completely or leave no trace. Errors follow
/// the `PortError` taxonomy:
///
/// - `NotFound` - the addressed bill does not exist
/// - `Reference` - a supplied customer or product id does not resolve
/// - `Conflict` - a line item for the product is already on the bill
/// - `Validation` - input rejected before storage was touched
#[async_trait]
pub trait BillPort: DomainPort + HealthCheckable {
    /// Creates a bill with its initial line items in one atomic operation
    ///
    /// # Arguments
    ///
    /// * `customer` - Customer the bill is issued to; must exist
    /// * `items` - Initial line items, possibly empty; every product must exist
    ///
    /// # Returns
    ///
    /// The stored bill with its generated id, number and timestamp
    async fn create_bill(&self, customer: CustomerId, items: LineItems) -> Result<Bill, PortError>;

    /// Replaces the customer and the whole line-item set of a bill
    ///
    /// This is a full replace, not a merge: items absent from `items` are
    /// removed. The bill's number and creation time are left untouched.
    async fn replace_bill_contents(
        &self,
        bill: BillId,
        customer: CustomerId,
        items: LineItems,
    ) -> Result<(), PortError>;

    /// Deletes a bill and, with it, all of its line items
    async fn delete_bill(&self, bill: BillId) -> Result<(), PortError>;

    /// Reads the bill header, its customer and its line items as one snapshot
    async fn read_bill_detail(&self, bill: BillId) -> Result<BillVerbose, PortError>;

    /// Adds one line item to an existing bill
    ///
    /// # Errors
    ///
    /// * `PortError::Conflict` if the product is already on the bill
    /// * `PortError::Reference` if the bill or the product does not exist
    async fn add_line_item(&self, bill: BillId, item: BillProduct) -> Result<(), PortError>;

    /// Removes the line item for `product`; succeeds when there is none
    async fn remove_line_item(&self, bill: BillId, product: ProductId) -> Result<(), PortError>;

    /// Lists all bill headers ordered by id
    async fn list_bills(&self) -> Result<Vec<Bill>, PortError>;

    /// Lists the full products attached to a bill, ordered by product id
    ///
    /// Unknown bills yield an empty list.
    async fn list_bill_products(&self, bill: BillId) -> Result<Vec<Product>, PortError>;
}

/// Mock implementation of BillPort for testing
///
/// Bills live in memory next to a shared `MockCatalog`. References are held
/// on the catalog while a bill uses a customer or product, so catalog deletes
/// fail the way foreign keys make them fail in PostgreSQL.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use chrono::Utc;
    use tokio::sync::RwLock;
    use uuid::Uuid;

    use core_kernel::HealthCheckResult;
    use domain_catalog::ports::mock::MockCatalog;
    use domain_catalog::{CustomerPort, ProductPort};

    use crate::line_items::{missing_products, missing_products_message};

    #[derive(Debug, Clone)]
    struct StoredBill {
        bill: Bill,
        items: BTreeMap<ProductId, i32>,
    }

    #[derive(Debug, Default)]
    struct BillTable {
        rows: BTreeMap<BillId, StoredBill>,
        last_id: i32,
    }

    /// In-memory bill writer
    #[derive(Debug)]
    pub struct MockBillPort {
        catalog: Arc<MockCatalog>,
        bills: RwLock<BillTable>,
    }

    impl MockBillPort {
        /// Creates a bill port over the given catalog
        pub fn new(catalog: Arc<MockCatalog>) -> Self {
            Self {
                catalog,
                bills: RwLock::new(BillTable::default()),
            }
        }

        /// Returns the catalog the bills reference
        pub fn catalog(&self) -> &Arc<MockCatalog> {
            &self.catalog
        }

        /// Number of stored bills
        pub async fn bill_count(&self) -> usize {
            self.bills.read().await.rows.len()
        }

        /// Holds the customer and every product, or nothing
        ///
        /// Each hold checks existence atomically with the catalog's deletes,
        /// so a referenced row cannot disappear before the bill is stored.
        async fn acquire_references(
            &self,
            customer: CustomerId,
            items: &LineItems,
        ) -> Result<BTreeMap<ProductId, i32>, PortError> {
            if !self.catalog.try_hold_customer(customer).await {
                return Err(PortError::reference(
                    "customer",
                    format!("customer with passed id:{} not exists", customer),
                ));
            }

            let requested = items.product_ids();
            let mut found = Vec::with_capacity(requested.len());
            for id in &requested {
                if self.catalog.try_hold_product(*id).await {
                    found.push(*id);
                }
            }
            let missing = missing_products(&requested, &found);
            if !missing.is_empty() {
                self.catalog.release_customer(customer).await;
                for id in found {
                    self.catalog.release_product(id).await;
                }
                return Err(PortError::reference("product", missing_products_message(&missing)));
            }
            Ok(to_map(items))
        }

        async fn release(&self, customer: CustomerId, items: &BTreeMap<ProductId, i32>) {
            self.catalog.release_customer(customer).await;
            for product in items.keys() {
                self.catalog.release_product(*product).await;
            }
        }
    }

    fn to_map(items: &LineItems) -> BTreeMap<ProductId, i32> {
        items.iter().map(|item| (item.product, item.quantity)).collect()
    }

    impl DomainPort for MockBillPort {}

    #[async_trait]
    impl HealthCheckable for MockBillPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::healthy("mock-bill-port", 0)
        }
    }

    #[async_trait]
    impl BillPort for MockBillPort {
        async fn create_bill(&self, customer: CustomerId, items: LineItems) -> Result<Bill, PortError> {
            let mut table = self.bills.write().await;
            let items = self.acquire_references(customer, &items).await?;

            table.last_id += 1;
            let bill = Bill {
                id: BillId::new(table.last_id),
                number: Uuid::new_v4(),
                created_at: Utc::now(),
                customer,
            };
            table.rows.insert(bill.id, StoredBill { bill: bill.clone(), items });
            Ok(bill)
        }

        async fn replace_bill_contents(
            &self,
            bill: BillId,
            customer: CustomerId,
            items: LineItems,
        ) -> Result<(), PortError> {
            let mut table = self.bills.write().await;
            if !table.rows.contains_key(&bill) {
                return Err(PortError::not_found("Bill", bill));
            }
            let items = self.acquire_references(customer, &items).await?;
            if let Some(stored) = table.rows.get_mut(&bill) {
                let previous = std::mem::replace(&mut stored.items, items);
                let previous_customer = std::mem::replace(&mut stored.bill.customer, customer);
                self.release(previous_customer, &previous).await;
            }
            Ok(())
        }

        async fn delete_bill(&self, bill: BillId) -> Result<(), PortError> {
            let removed = self.bills.write().await.rows.remove(&bill);
            match removed {
                Some(stored) => {
                    self.release(stored.bill.customer, &stored.items).await;
                    Ok(())
                }
                None => Err(PortError::not_found("Bill", bill)),
            }
        }

        async fn read_bill_detail(&self, bill: BillId) -> Result<BillVerbose, PortError> {
            let stored = self
                .bills
                .read()
                .await
                .rows
                .get(&bill)
                .cloned()
                .ok_or_else(|| PortError::not_found("Bill", bill))?;
            let customer = self.catalog.get_customer(stored.bill.customer).await?;

            Ok(BillVerbose {
                id: stored.bill.id,
                number: stored.bill.number,
                created_at: stored.bill.created_at,
                customer,
                products: stored
                    .items
                    .iter()
                    .map(|(product, quantity)| BillProduct::new(*product, *quantity))
                    .collect(),
            })
        }

        async fn add_line_item(&self, bill: BillId, item: BillProduct) -> Result<(), PortError> {
            let item = item.validated()?;
            let mut table = self.bills.write().await;
            let Some(stored) = table.rows.get_mut(&bill) else {
                return Err(PortError::reference("bill", "Passed product or bill not exists"));
            };
            if stored.items.contains_key(&item.product) {
                return Err(PortError::conflict("Passed product already exists in bill"));
            }
            if !self.catalog.try_hold_product(item.product).await {
                return Err(PortError::reference("bill", "Passed product or bill not exists"));
            }
            stored.items.insert(item.product, item.quantity);
            Ok(())
        }

        async fn remove_line_item(&self, bill: BillId, product: ProductId) -> Result<(), PortError> {
            let mut table = self.bills.write().await;
            let removed = table
                .rows
                .get_mut(&bill)
                .and_then(|stored| stored.items.remove(&product));
            if removed.is_some() {
                self.catalog.release_product(product).await;
            }
            Ok(())
        }

        async fn list_bills(&self) -> Result<Vec<Bill>, PortError> {
            Ok(self
                .bills
                .read()
                .await
                .rows
                .values()
                .map(|stored| stored.bill.clone())
                .collect())
        }

        async fn list_bill_products(&self, bill: BillId) -> Result<Vec<Product>, PortError> {
            let product_ids: Vec<ProductId> = match self.bills.read().await.rows.get(&bill) {
                Some(stored) => stored.items.keys().copied().collect(),
                None => return Ok(Vec::new()),
            };
            let mut products = Vec::with_capacity(product_ids.len());
            for id in product_ids {
                products.push(self.catalog.get_product(id).await?);
            }
            Ok(products)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockBillPort;
    use super::*;
    use domain_catalog::ports::mock::MockCatalog;
    use domain_catalog::{CustomerInput, CustomerPort, ProductInput, ProductPort};
    use std::sync::Arc;

    async fn setup() -> (MockBillPort, CustomerId, ProductId) {
        let catalog = Arc::new(MockCatalog::new());
        let customer = catalog
            .create_customer(CustomerInput::new("Ada", "Lovelace"))
            .await
            .unwrap();
        let product = catalog
            .create_product(ProductInput::new("Tea", "Green tea", 350, 40))
            .await
            .unwrap();
        (MockBillPort::new(catalog), customer.id, product.id)
    }

    #[tokio::test]
    async fn test_mock_create_and_read() {
        let (port, customer, product) = setup().await;
        let items = LineItems::new(vec![BillProduct::new(product, 2)]).unwrap();

        let bill = port.create_bill(customer, items).await.unwrap();
        let detail = port.read_bill_detail(bill.id).await.unwrap();

        assert_eq!(detail.header(), bill);
        assert_eq!(detail.quantity_of(product), Some(2));
    }

    #[tokio::test]
    async fn test_mock_add_line_item_rejects_zero_quantity() {
        let (port, customer, product) = setup().await;
        let bill = port.create_bill(customer, LineItems::empty()).await.unwrap();

        let err = port
            .add_line_item(bill.id, BillProduct::new(product, 0))
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_mock_health_check() {
        let (port, _, _) = setup().await;
        assert!(port.health_check().await.is_healthy());
    }
}
