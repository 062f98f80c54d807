//! Ports and Adapters Infrastructure
//!
//! This module provides the foundational types for the ports and adapters
//! layout used by the catalog and billing domains.
//!
//! ```text
//!           HTTP handlers (interface_api)
//!                       │
//!                       ▼
//!   Port traits (ProductPort, CustomerPort, BillPort)
//!        defined in the domain crates
//!            ▲                        ▲
//!            │                        │
//!   PostgreSQL adapters         In-memory mock adapters
//!       (infra_db)              (feature = "mock")
//! ```
//!
//! Every port method returns `Result<T, PortError>`, so handlers map one error
//! type to HTTP regardless of which adapter is wired in.

use std::fmt;
use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Error type for port operations
///
/// The variants form the error taxonomy of the backend. Handlers translate
/// them to client-facing responses; adapters translate storage failures into
/// them.
#[derive(Debug, Error)]
pub enum PortError {
    /// The entity addressed by id was not found
    #[error("{entity} with passed id:{id} not exists")]
    NotFound {
        entity: String,
        id: String,
    },

    /// A supplied foreign key does not resolve to an existing entity
    #[error("{message}")]
    Reference {
        entity: String,
        message: String,
    },

    /// The operation conflicts with existing data (uniqueness, references)
    #[error("{message}")]
    Conflict {
        message: String,
    },

    /// The input failed validation before reaching storage
    #[error("{message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Connection to the storage engine failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The operation timed out
    #[error("Timeout after {duration_ms}ms: {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
    },

    /// An unexpected internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Reference error for an unresolved foreign key
    pub fn reference(entity: impl Into<String>, message: impl Into<String>) -> Self {
        PortError::Reference {
            entity: entity.into(),
            message: message.into(),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Creates a Validation error with field information
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates a transient failure that may succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(self, PortError::Connection { .. } | PortError::Timeout { .. })
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }

    /// Returns true if a supplied reference did not resolve
    pub fn is_reference(&self) -> bool {
        matches!(self, PortError::Reference { .. })
    }

    /// Returns true if this error is a uniqueness or reference conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, PortError::Conflict { .. })
    }

    /// Returns true if the input was rejected before reaching storage
    pub fn is_validation(&self) -> bool {
        matches!(self, PortError::Validation { .. })
    }
}

/// Marker trait for all domain ports
///
/// All port traits extend this marker so they can be shared across request
/// tasks behind an `Arc<dyn ...>`.
pub trait DomainPort: Send + Sync + 'static {}

/// Health status for an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    /// Adapter is healthy and operational
    Healthy,
    /// Adapter is unhealthy and not operational
    Unhealthy,
}

/// Health check result for an adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    /// Adapter identifier
    pub adapter_id: String,
    /// Current health status
    pub status: AdapterHealth,
    /// Latency of the health check in milliseconds
    pub latency_ms: u64,
    /// Optional message with additional details
    pub message: Option<String>,
    /// Timestamp of the health check
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl HealthCheckResult {
    /// Builds a healthy result for the given adapter
    pub fn healthy(adapter_id: impl Into<String>, latency_ms: u64) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            status: AdapterHealth::Healthy,
            latency_ms,
            message: None,
            checked_at: chrono::Utc::now(),
        }
    }

    /// Builds an unhealthy result carrying the failure reason
    pub fn unhealthy(adapter_id: impl Into<String>, latency_ms: u64, message: impl Into<String>) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            status: AdapterHealth::Unhealthy,
            latency_ms,
            message: Some(message.into()),
            checked_at: chrono::Utc::now(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == AdapterHealth::Healthy
    }
}

/// Trait for adapters that support health checks
#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    /// Performs a health check on the adapter
    async fn health_check(&self) -> HealthCheckResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_not_found() {
        let error = PortError::not_found("Bill", 123);
        assert!(error.is_not_found());
        assert!(!error.is_transient());
        assert_eq!(error.to_string(), "Bill with passed id:123 not exists");
    }

    #[test]
    fn test_port_error_transient() {
        let timeout = PortError::Timeout {
            operation: "create_bill".to_string(),
            duration_ms: 5000,
        };
        assert!(timeout.is_transient());
        assert!(PortError::connection("refused").is_transient());
        assert!(!PortError::validation("quantity must be positive").is_transient());
    }

    #[test]
    fn test_reference_and_conflict_messages() {
        let reference = PortError::reference("product", "not all passed products exists");
        assert!(reference.is_reference());
        assert_eq!(reference.to_string(), "not all passed products exists");

        let conflict = PortError::conflict("Passed product already exists in bill");
        assert!(conflict.is_conflict());
        assert!(!conflict.is_reference());
    }

    #[test]
    fn test_health_check_result_builders() {
        assert!(HealthCheckResult::healthy("mock", 0).is_healthy());
        let down = HealthCheckResult::unhealthy("postgres", 12, "connection refused");
        assert_eq!(down.status, AdapterHealth::Unhealthy);
        assert_eq!(down.message.as_deref(), Some("connection refused"));
    }
}
