//! Repository implementations for the stored entities
//!
//! Repositories own the SQL. They speak in row types keyed by raw `i32` ids
//! and return `DatabaseError`; the adapters translate to domain types and
//! `PortError`.
//!
//! Queries are built at runtime with `sqlx::query_as` and `FromRow` rows, so
//! the crate compiles without a live database.

pub mod product;
pub mod customer;
pub mod bill;

pub use product::{ProductRepository, ProductRow, NewProduct};
pub use customer::{CustomerRepository, CustomerRow, NewCustomer};
pub use bill::{BillRepository, BillRow, BillDetailRows, NewLineItem};
