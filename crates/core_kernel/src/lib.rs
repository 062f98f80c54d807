//! Core Kernel - Foundational types shared by every crate of the billing backend
//!
//! This crate provides the building blocks used across the domain, storage and
//! HTTP layers:
//! - Strongly-typed identifiers for products, customers and bills
//! - The `PortError` taxonomy returned by every port implementation
//! - Marker and health-check traits for ports and adapters

pub mod identifiers;
pub mod error;
pub mod ports;

pub use identifiers::{BillId, CustomerId, ProductId};
pub use error::CoreError;
pub use ports::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
