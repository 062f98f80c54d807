//! PostgreSQL Customer Adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{CustomerId, DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_catalog::{Customer, CustomerInput, CustomerPort};

use super::check_pool;
use crate::error::DatabaseError;
use crate::repositories::customer::{CustomerRepository, CustomerRow, NewCustomer};

/// PostgreSQL-backed implementation of the CustomerPort trait
#[derive(Debug, Clone)]
pub struct PostgresCustomerAdapter {
    repository: CustomerRepository,
    pool: PgPool,
}

impl PostgresCustomerAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CustomerRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresCustomerAdapter {}

#[async_trait]
impl HealthCheckable for PostgresCustomerAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        check_pool(&self.pool, "postgres-customer-adapter").await
    }
}

#[async_trait]
impl CustomerPort for PostgresCustomerAdapter {
    #[instrument(skip(self))]
    async fn list_customers(&self) -> Result<Vec<Customer>, PortError> {
        debug!("Listing customers");
        let rows = self.repository.list().await?;
        Ok(rows.into_iter().map(row_to_customer).collect())
    }

    #[instrument(skip(self), fields(customer_id = %id))]
    async fn get_customer(&self, id: CustomerId) -> Result<Customer, PortError> {
        debug!("Fetching customer by ID");
        Ok(row_to_customer(self.repository.get(id.value()).await?))
    }

    #[instrument(skip(self, input))]
    async fn create_customer(&self, input: CustomerInput) -> Result<Customer, PortError> {
        let input = input.validated()?;
        debug!("Creating customer");
        let row = self.repository.insert(&to_new_customer(input)).await?;
        Ok(row_to_customer(row))
    }

    #[instrument(skip(self, input), fields(customer_id = %id))]
    async fn update_customer(&self, id: CustomerId, input: CustomerInput) -> Result<(), PortError> {
        let input = input.validated()?;
        debug!("Updating customer");
        self.repository.update(id.value(), &to_new_customer(input)).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(customer_id = %id))]
    async fn delete_customer(&self, id: CustomerId) -> Result<(), PortError> {
        debug!("Deleting customer");
        self.repository
            .delete(id.value())
            .await
            .map_err(|e| match e {
                DatabaseError::ForeignKeyViolation(_) => {
                    PortError::conflict("Customer is referenced by existing bills")
                }
                other => other.into(),
            })
    }
}

pub(crate) fn row_to_customer(row: CustomerRow) -> Customer {
    Customer {
        id: CustomerId::new(row.id),
        first_name: row.first_name,
        last_name: row.last_name,
    }
}

fn to_new_customer(input: CustomerInput) -> NewCustomer {
    NewCustomer {
        first_name: input.first_name,
        last_name: input.last_name,
    }
}
