//! Catalog Domain - Products and Customers
//!
//! Products and customers are independently owned entities. Bills reference
//! them by id, so the catalog is the source of truth the billing domain
//! validates against.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_catalog::{ProductInput, ProductPort};
//!
//! let product = products.create_product(ProductInput::new("Tea", "Green tea", 350, 40)).await?;
//! ```

pub mod product;
pub mod customer;
pub mod ports;
pub mod error;

pub use product::{Product, ProductInput};
pub use customer::{Customer, CustomerInput};
pub use ports::{CustomerPort, ProductPort};
pub use error::CatalogError;
