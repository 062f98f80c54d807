//! Product repository implementation

use sqlx::{FromRow, PgPool};

use crate::error::DatabaseError;

/// A row of the `product` table
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ProductRow {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: i32,
    pub quantity: i32,
}

/// Column values for an insert or a full update
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: i32,
    pub quantity: i32,
}

/// Repository for the `product` table
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Creates a new ProductRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists all products ordered by id
    pub async fn list(&self) -> Result<Vec<ProductRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, description, price, quantity FROM product ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Retrieves a product by id
    ///
    /// # Errors
    ///
    /// `DatabaseError::NotFound` when no row has the id
    pub async fn get(&self, id: i32) -> Result<ProductRow, DatabaseError> {
        sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, description, price, quantity FROM product WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Product", id))
    }

    /// Inserts a product and returns the stored row
    pub async fn insert(&self, product: &NewProduct) -> Result<ProductRow, DatabaseError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO product (name, description, price, quantity)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, price, quantity
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.quantity)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Overwrites every column of an existing product
    pub async fn update(&self, id: i32, product: &NewProduct) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE product
            SET name = $2, description = $3, price = $4, quantity = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.quantity)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Product", id));
        }
        Ok(())
    }

    /// Deletes a product
    ///
    /// Fails with `DatabaseError::ForeignKeyViolation` while a bill line item
    /// references it.
    pub async fn delete(&self, id: i32) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Product", id));
        }
        Ok(())
    }
}
