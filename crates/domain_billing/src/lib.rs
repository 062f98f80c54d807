//! Billing Domain - Bills and their line items
//!
//! A bill links one customer to a set of purchased products with quantities.
//! The set is stored as one association row per product, so a bill never
//! lists the same product twice.
//!
//! # Write protocol
//!
//! Bill creation and wholesale replacement run inside one storage transaction:
//!
//! 1. the line-item set is validated in memory (`LineItems::new`)
//! 2. the customer and every product are confirmed to exist
//! 3. the bill row is inserted or updated
//! 4. line items are (re)inserted
//! 5. the transaction commits, or rolls back entirely on any failure
//!
//! Single line-item inserts skip the pre-checks and rely on the storage
//! constraints instead.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_billing::{BillPort, BillProduct, LineItems};
//!
//! let items = LineItems::new(vec![BillProduct::new(tea, 2), BillProduct::new(cake, 1)])?;
//! let bill = bills.create_bill(customer_id, items).await?;
//! let detail = bills.read_bill_detail(bill.id).await?;
//! ```

pub mod bill;
pub mod line_items;
pub mod ports;
pub mod error;

pub use bill::{Bill, BillProduct, BillVerbose};
pub use line_items::{missing_products, missing_products_message, LineItems};
pub use ports::BillPort;
pub use error::BillingError;
