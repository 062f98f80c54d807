//! Bill repository implementation
//!
//! Bill creation and wholesale replacement run the whole check-then-write
//! sequence inside one transaction. Referenced customer and product rows are
//! locked `FOR KEY SHARE`, which blocks their deletion until commit, and a
//! replaced bill row is locked `FOR UPDATE`, so concurrent replaces of the
//! same bill serialize. On any error the transaction is rolled back; a
//! transaction dropped mid-flight (cancelled request) rolls back as well.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool, Postgres, Transaction};
use tracing::warn;
use uuid::Uuid;

use core_kernel::ProductId;
use domain_billing::{missing_products, missing_products_message};

use super::product::ProductRow;
use crate::error::DatabaseError;

/// A row of the `bill` table
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct BillRow {
    pub id: i32,
    pub number: Uuid,
    pub created_at: DateTime<Utc>,
    pub customer_id: i32,
}

/// Bill header joined with its customer's names
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct BillCustomerRow {
    pub id: i32,
    pub number: Uuid,
    pub created_at: DateTime<Utc>,
    pub customer_id: i32,
    pub first_name: String,
    pub last_name: String,
}

/// A row of the `productbill` association table, without its bill id
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct LineItemRow {
    pub product_id: i32,
    pub quantity: i32,
}

/// Line item to insert
#[derive(Debug, Clone, Copy)]
pub struct NewLineItem {
    pub product_id: i32,
    pub quantity: i32,
}

/// Everything `read_bill_detail` needs, read in one transaction
#[derive(Debug, Clone)]
pub struct BillDetailRows {
    pub header: BillCustomerRow,
    pub items: Vec<LineItemRow>,
}

/// Repository for bills and their line items
#[derive(Debug, Clone)]
pub struct BillRepository {
    pool: PgPool,
}

impl BillRepository {
    /// Creates a new BillRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists all bill headers ordered by id
    pub async fn list(&self) -> Result<Vec<BillRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, BillRow>(
            "SELECT id, number, created_at, customer_id FROM bill ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Creates a bill with its line items in a single transaction
    ///
    /// # Errors
    ///
    /// * `DatabaseError::MissingReference` if the customer or any product does not exist
    /// * constraint violations raised by the inserts
    pub async fn create(
        &self,
        customer_id: i32,
        items: &[NewLineItem],
    ) -> Result<BillRow, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        match create_in_tx(&mut tx, customer_id, items).await {
            Ok(row) => {
                tx.commit().await?;
                Ok(row)
            }
            Err(e) => {
                rollback(tx, "create_bill", &e).await;
                Err(e)
            }
        }
    }

    /// Replaces the customer and all line items of a bill in a single transaction
    ///
    /// `number` and `created_at` are left untouched.
    ///
    /// # Errors
    ///
    /// * `DatabaseError::NotFound` if the bill does not exist
    /// * `DatabaseError::MissingReference` if the customer or any product does not exist
    pub async fn replace(
        &self,
        bill_id: i32,
        customer_id: i32,
        items: &[NewLineItem],
    ) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;
        match replace_in_tx(&mut tx, bill_id, customer_id, items).await {
            Ok(()) => {
                tx.commit().await?;
                Ok(())
            }
            Err(e) => {
                rollback(tx, "replace_bill_contents", &e).await;
                Err(e)
            }
        }
    }

    /// Deletes a bill; its line items go with it through `ON DELETE CASCADE`
    pub async fn delete(&self, bill_id: i32) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM bill WHERE id = $1")
            .bind(bill_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Bill", bill_id));
        }
        Ok(())
    }

    /// Reads the bill header with its customer and its line items as one snapshot
    ///
    /// Under READ COMMITTED every statement sees a fresh snapshot, so the
    /// transaction is switched to REPEATABLE READ before the first read.
    pub async fn detail(&self, bill_id: i32) -> Result<BillDetailRows, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let header = sqlx::query_as::<_, BillCustomerRow>(
            r#"
            SELECT b.id, b.number, b.created_at, b.customer_id, c.first_name, c.last_name
            FROM bill b
            JOIN customer c ON c.id = b.customer_id
            WHERE b.id = $1
            "#,
        )
        .bind(bill_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Bill", bill_id))?;

        let items = sqlx::query_as::<_, LineItemRow>(
            "SELECT product_id, quantity FROM productbill WHERE bill_id = $1 ORDER BY product_id",
        )
        .bind(bill_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(BillDetailRows { header, items })
    }

    /// Inserts a single line item without pre-checks
    ///
    /// The storage constraints decide: a repeated product is a
    /// `DuplicateEntry`, an unknown bill or product a `ForeignKeyViolation`.
    pub async fn insert_line_item(
        &self,
        bill_id: i32,
        item: NewLineItem,
    ) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO productbill (bill_id, product_id, quantity) VALUES ($1, $2, $3)")
            .bind(bill_id)
            .bind(item.product_id)
            .bind(item.quantity)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Deletes the line item for a product; an absent pair is not an error
    pub async fn delete_line_item(&self, bill_id: i32, product_id: i32) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM productbill WHERE bill_id = $1 AND product_id = $2")
            .bind(bill_id)
            .bind(product_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Lists the full products attached to a bill, ordered by product id
    pub async fn products(&self, bill_id: i32) -> Result<Vec<ProductRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT p.id, p.name, p.description, p.price, p.quantity
            FROM product p
            JOIN productbill pb ON pb.product_id = p.id
            WHERE pb.bill_id = $1
            ORDER BY p.id
            "#,
        )
        .bind(bill_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

async fn create_in_tx(
    conn: &mut PgConnection,
    customer_id: i32,
    items: &[NewLineItem],
) -> Result<BillRow, DatabaseError> {
    lock_customer(conn, customer_id).await?;
    lock_products(conn, items).await?;

    let bill = sqlx::query_as::<_, BillRow>(
        r#"
        INSERT INTO bill (number, customer_id)
        VALUES ($1, $2)
        RETURNING id, number, created_at, customer_id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(customer_id)
    .fetch_one(&mut *conn)
    .await?;

    insert_line_items(conn, bill.id, items).await?;
    Ok(bill)
}

async fn replace_in_tx(
    conn: &mut PgConnection,
    bill_id: i32,
    customer_id: i32,
    items: &[NewLineItem],
) -> Result<(), DatabaseError> {
    sqlx::query_scalar::<_, i32>("SELECT id FROM bill WHERE id = $1 FOR UPDATE")
        .bind(bill_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Bill", bill_id))?;

    lock_customer(conn, customer_id).await?;
    lock_products(conn, items).await?;

    sqlx::query("UPDATE bill SET customer_id = $2 WHERE id = $1")
        .bind(bill_id)
        .bind(customer_id)
        .execute(&mut *conn)
        .await?;

    sqlx::query("DELETE FROM productbill WHERE bill_id = $1")
        .bind(bill_id)
        .execute(&mut *conn)
        .await?;

    insert_line_items(conn, bill_id, items).await
}

/// Confirms the customer exists and keeps it from being deleted until commit
async fn lock_customer(conn: &mut PgConnection, customer_id: i32) -> Result<(), DatabaseError> {
    let found = sqlx::query_scalar::<_, i32>("SELECT id FROM customer WHERE id = $1 FOR KEY SHARE")
        .bind(customer_id)
        .fetch_optional(&mut *conn)
        .await?;

    match found {
        Some(_) => Ok(()),
        None => Err(DatabaseError::missing_reference(
            "customer",
            format!("customer with passed id:{} not exists", customer_id),
        )),
    }
}

/// Confirms every product exists, naming the ones that do not
async fn lock_products(conn: &mut PgConnection, items: &[NewLineItem]) -> Result<(), DatabaseError> {
    if items.is_empty() {
        return Ok(());
    }

    let requested: Vec<i32> = items.iter().map(|item| item.product_id).collect();
    let found = sqlx::query_scalar::<_, i32>(
        "SELECT id FROM product WHERE id = ANY($1) ORDER BY id FOR KEY SHARE",
    )
    .bind(&requested)
    .fetch_all(&mut *conn)
    .await?;

    let requested: Vec<ProductId> = requested.into_iter().map(ProductId::new).collect();
    let found: Vec<ProductId> = found.into_iter().map(ProductId::new).collect();
    let missing = missing_products(&requested, &found);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DatabaseError::missing_reference(
            "product",
            missing_products_message(&missing),
        ))
    }
}

async fn insert_line_items(
    conn: &mut PgConnection,
    bill_id: i32,
    items: &[NewLineItem],
) -> Result<(), DatabaseError> {
    for item in items {
        sqlx::query("INSERT INTO productbill (bill_id, product_id, quantity) VALUES ($1, $2, $3)")
            .bind(bill_id)
            .bind(item.product_id)
            .bind(item.quantity)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

async fn rollback(tx: Transaction<'_, Postgres>, operation: &'static str, cause: &DatabaseError) {
    warn!(operation, error = %cause, "Rolling back bill transaction");
    if let Err(e) = tx.rollback().await {
        warn!(operation, error = %e, "Rollback failed, connection will be discarded");
    }
}
