//! Infrastructure Database Layer
//!
//! PostgreSQL storage for products, customers and bills, using SQLx.
//!
//! # Architecture
//!
//! - `pool`: connection pool creation with a bounded startup retry
//! - `schema`: the structure and seed scripts
//! - `repositories`: SQL access returning row types and `DatabaseError`
//! - `adapters`: implementations of the domain ports over the repositories
//!
//! Every bill mutation that touches more than one row runs in a single
//! transaction; see `repositories::bill` for the locking protocol.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{connect_with_retry, DatabaseConfig, PostgresBillAdapter};
//!
//! let pool = connect_with_retry(&DatabaseConfig::new(url)).await?;
//! infra_db::schema::migrate(&pool, None).await?;
//! let bills = PostgresBillAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod schema;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, connect_with_retry, DatabaseConfig};
pub use error::DatabaseError;
pub use schema::Script;
pub use adapters::{PostgresBillAdapter, PostgresCustomerAdapter, PostgresProductAdapter};
