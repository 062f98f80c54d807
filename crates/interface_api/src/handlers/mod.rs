//! Request handlers, one module per resource

pub mod health;
pub mod product;
pub mod customer;
pub mod bill;
