//! PostgreSQL Product Adapter
//!
//! Implements `ProductPort` on top of `ProductRepository`.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{DomainPort, HealthCheckResult, HealthCheckable, PortError, ProductId};
use domain_catalog::{Product, ProductInput, ProductPort};

use super::check_pool;
use crate::error::DatabaseError;
use crate::repositories::product::{NewProduct, ProductRepository, ProductRow};

/// PostgreSQL-backed implementation of the ProductPort trait
///
/// Deleting a product still referenced by a bill line item fails on the
/// foreign key; that case is reported as `PortError::Conflict`.
#[derive(Debug, Clone)]
pub struct PostgresProductAdapter {
    repository: ProductRepository,
    pool: PgPool,
}

impl PostgresProductAdapter {
    /// Creates a new PostgreSQL product adapter
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ProductRepository::new(pool.clone()),
            pool,
        }
    }

    /// Returns a reference to the underlying repository
    pub fn repository(&self) -> &ProductRepository {
        &self.repository
    }
}

impl DomainPort for PostgresProductAdapter {}

#[async_trait]
impl HealthCheckable for PostgresProductAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        check_pool(&self.pool, "postgres-product-adapter").await
    }
}

#[async_trait]
impl ProductPort for PostgresProductAdapter {
    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, PortError> {
        debug!("Listing products");
        let rows = self.repository.list().await?;
        Ok(rows.into_iter().map(row_to_product).collect())
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn get_product(&self, id: ProductId) -> Result<Product, PortError> {
        debug!("Fetching product by ID");
        let row = self.repository.get(id.value()).await?;
        Ok(row_to_product(row))
    }

    #[instrument(skip(self, input))]
    async fn create_product(&self, input: ProductInput) -> Result<Product, PortError> {
        let input = input.validated()?;
        debug!(name = %input.name, "Creating product");
        let row = self.repository.insert(&to_new_product(input)).await?;
        Ok(row_to_product(row))
    }

    #[instrument(skip(self, input), fields(product_id = %id))]
    async fn update_product(&self, id: ProductId, input: ProductInput) -> Result<(), PortError> {
        let input = input.validated()?;
        debug!("Updating product");
        self.repository.update(id.value(), &to_new_product(input)).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn delete_product(&self, id: ProductId) -> Result<(), PortError> {
        debug!("Deleting product");
        self.repository
            .delete(id.value())
            .await
            .map_err(|e| match e {
                DatabaseError::ForeignKeyViolation(_) => {
                    PortError::conflict("Product is referenced by existing bills")
                }
                other => other.into(),
            })
    }
}

pub(crate) fn row_to_product(row: ProductRow) -> Product {
    Product {
        id: ProductId::new(row.id),
        name: row.name,
        description: row.description,
        price: row.price,
        quantity: row.quantity,
    }
}

fn to_new_product(input: ProductInput) -> NewProduct {
    NewProduct {
        name: input.name,
        description: input.description,
        price: input.price,
        quantity: input.quantity,
    }
}
