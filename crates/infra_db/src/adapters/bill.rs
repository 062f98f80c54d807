//! PostgreSQL Bill Adapter
//!
//! The bill writer backed by `BillRepository`. Line-item sets arrive already
//! validated as `LineItems`; the repository then runs the reference checks
//! and writes in one transaction.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresBillAdapter;
//! use domain_billing::{BillPort, BillProduct, LineItems};
//! use std::sync::Arc;
//!
//! let port: Arc<dyn BillPort> = Arc::new(PostgresBillAdapter::new(pool));
//! let items = LineItems::new(vec![BillProduct::new(product_id, 2)])?;
//! let bill = port.create_bill(customer_id, items).await?;
//! ```

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    BillId, CustomerId, DomainPort, HealthCheckResult, HealthCheckable, PortError, ProductId,
};
use domain_billing::{Bill, BillPort, BillProduct, BillVerbose, LineItems};
use domain_catalog::{Customer, Product};

use super::check_pool;
use super::product::row_to_product;
use crate::error::DatabaseError;
use crate::repositories::bill::{BillDetailRows, BillRepository, BillRow, NewLineItem};

/// PostgreSQL-backed implementation of the BillPort trait
///
/// # Error Handling
///
/// - missing customer or products -> `PortError::Reference`
/// - unknown bill on replace, delete or read -> `PortError::NotFound`
/// - single line-item insert: unique violation -> `PortError::Conflict`,
///   foreign key violation -> `PortError::Reference`
#[derive(Debug, Clone)]
pub struct PostgresBillAdapter {
    repository: BillRepository,
    pool: PgPool,
}

impl PostgresBillAdapter {
    /// Creates a new PostgreSQL bill adapter
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: BillRepository::new(pool.clone()),
            pool,
        }
    }

    /// Returns a reference to the underlying repository
    pub fn repository(&self) -> &BillRepository {
        &self.repository
    }
}

impl DomainPort for PostgresBillAdapter {}

#[async_trait]
impl HealthCheckable for PostgresBillAdapter {
    /// Checks database connectivity with `SELECT 1`
    async fn health_check(&self) -> HealthCheckResult {
        check_pool(&self.pool, "postgres-bill-adapter").await
    }
}

#[async_trait]
impl BillPort for PostgresBillAdapter {
    #[instrument(skip(self, items), fields(customer_id = %customer, items = items.len()))]
    async fn create_bill(&self, customer: CustomerId, items: LineItems) -> Result<Bill, PortError> {
        debug!("Creating bill");
        let row = self
            .repository
            .create(customer.value(), &to_new_line_items(&items))
            .await?;
        Ok(row_to_bill(row))
    }

    #[instrument(skip(self, items), fields(bill_id = %bill, customer_id = %customer, items = items.len()))]
    async fn replace_bill_contents(
        &self,
        bill: BillId,
        customer: CustomerId,
        items: LineItems,
    ) -> Result<(), PortError> {
        debug!("Replacing bill contents");
        self.repository
            .replace(bill.value(), customer.value(), &to_new_line_items(&items))
            .await?;
        Ok(())
    }

    #[instrument(skip(self), fields(bill_id = %bill))]
    async fn delete_bill(&self, bill: BillId) -> Result<(), PortError> {
        debug!("Deleting bill");
        self.repository.delete(bill.value()).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(bill_id = %bill))]
    async fn read_bill_detail(&self, bill: BillId) -> Result<BillVerbose, PortError> {
        debug!("Reading bill detail");
        let rows = self.repository.detail(bill.value()).await?;
        Ok(rows_to_verbose(rows))
    }

    #[instrument(skip(self), fields(bill_id = %bill, product_id = %item.product))]
    async fn add_line_item(&self, bill: BillId, item: BillProduct) -> Result<(), PortError> {
        let item = item.validated()?;
        debug!(quantity = item.quantity, "Adding line item");

        let new_item = NewLineItem {
            product_id: item.product.value(),
            quantity: item.quantity,
        };
        self.repository
            .insert_line_item(bill.value(), new_item)
            .await
            .map_err(|e| match e {
                DatabaseError::DuplicateEntry(_) => {
                    PortError::conflict("Passed product already exists in bill")
                }
                DatabaseError::ForeignKeyViolation(_) => {
                    PortError::reference("bill", "Passed product or bill not exists")
                }
                other => other.into(),
            })
    }

    #[instrument(skip(self), fields(bill_id = %bill, product_id = %product))]
    async fn remove_line_item(&self, bill: BillId, product: ProductId) -> Result<(), PortError> {
        debug!("Removing line item");
        self.repository
            .delete_line_item(bill.value(), product.value())
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_bills(&self) -> Result<Vec<Bill>, PortError> {
        debug!("Listing bills");
        let rows = self.repository.list().await?;
        Ok(rows.into_iter().map(row_to_bill).collect())
    }

    #[instrument(skip(self), fields(bill_id = %bill))]
    async fn list_bill_products(&self, bill: BillId) -> Result<Vec<Product>, PortError> {
        debug!("Listing bill products");
        let rows = self.repository.products(bill.value()).await?;
        Ok(rows.into_iter().map(row_to_product).collect())
    }
}

fn to_new_line_items(items: &LineItems) -> Vec<NewLineItem> {
    items
        .iter()
        .map(|item| NewLineItem {
            product_id: item.product.value(),
            quantity: item.quantity,
        })
        .collect()
}

fn row_to_bill(row: BillRow) -> Bill {
    Bill {
        id: BillId::new(row.id),
        number: row.number,
        created_at: row.created_at,
        customer: CustomerId::new(row.customer_id),
    }
}

fn rows_to_verbose(rows: BillDetailRows) -> BillVerbose {
    let header = rows.header;
    BillVerbose {
        id: BillId::new(header.id),
        number: header.number,
        created_at: header.created_at,
        customer: Customer {
            id: CustomerId::new(header.customer_id),
            first_name: header.first_name,
            last_name: header.last_name,
        },
        products: rows
            .items
            .into_iter()
            .map(|item| BillProduct::new(ProductId::new(item.product_id), item.quantity))
            .collect(),
    }
}
