//! Database error types
//!
//! This module defines the error types that can occur during database operations
//! and their translation into the port error taxonomy.

use core_kernel::PortError;
use thiserror::Error;

/// Errors that can occur during database operations
///
/// `sqlx::Error` values are classified by PostgreSQL SQLSTATE on conversion,
/// so callers can match on constraint violations without inspecting codes.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to establish a database connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Entity addressed by id not found
    #[error("{entity} with passed id:{id} not exists")]
    NotFound {
        entity: &'static str,
        id: String,
    },

    /// A referenced row was missing when checked inside a transaction
    #[error("{message}")]
    MissingReference {
        entity: &'static str,
        message: String,
    },

    /// Unique constraint violation (SQLSTATE 23505)
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Foreign key constraint violation (SQLSTATE 23503)
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Check constraint violation (SQLSTATE 23514)
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Schema or seed script failed
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Pool exhaustion - no available connections
    #[error("Connection pool exhausted")]
    PoolExhausted,
}

impl DatabaseError {
    /// Creates a not found error for a specific entity type and identifier
    ///
    /// # Example
    ///
    /// ```rust
    /// use infra_db::DatabaseError;
    ///
    /// let error = DatabaseError::not_found("Bill", 7);
    /// assert_eq!(error.to_string(), "Bill with passed id:7 not exists");
    /// ```
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        DatabaseError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Creates a missing reference error
    pub fn missing_reference(entity: &'static str, message: impl Into<String>) -> Self {
        DatabaseError::MissingReference {
            entity,
            message: message.into(),
        }
    }

    /// Checks if this error indicates a record was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound { .. })
    }

    /// Checks if this error is a constraint violation
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            DatabaseError::DuplicateEntry(_)
                | DatabaseError::ForeignKeyViolation(_)
                | DatabaseError::ConstraintViolation(_)
        )
    }

    /// Checks if this error is a connection-related issue
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted
        )
    }
}

/// Converts SQLx errors to more specific DatabaseError variants
///
/// This function analyzes the SQLx error and maps it to the appropriate
/// DatabaseError variant based on the PostgreSQL error code.
impl From<&sqlx::Error> for DatabaseError {
    fn from(error: &sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => DatabaseError::QueryFailed("Record not found".to_string()),
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted,
            sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
                DatabaseError::ConnectionFailed(error.to_string())
            }
            sqlx::Error::Database(db_err) => {
                // PostgreSQL error codes
                // https://www.postgresql.org/docs/current/errcodes-appendix.html
                let message = db_err.message().to_string();
                match db_err.code().as_deref() {
                    Some("23505") => DatabaseError::DuplicateEntry(message),
                    Some("23503") => DatabaseError::ForeignKeyViolation(message),
                    Some("23514") => DatabaseError::ConstraintViolation(message),
                    _ => DatabaseError::QueryFailed(message),
                }
            }
            _ => DatabaseError::QueryFailed(error.to_string()),
        }
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        DatabaseError::from(&error)
    }
}

/// Default translation into the port taxonomy
///
/// Adapters that know the context of a constraint violation (for example a
/// foreign key failing on delete rather than on insert) map those cases
/// themselves before falling back to this.
impl From<DatabaseError> for PortError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NotFound { entity, id } => PortError::NotFound {
                entity: entity.to_string(),
                id,
            },
            DatabaseError::MissingReference { entity, message } => {
                PortError::reference(entity, message)
            }
            DatabaseError::DuplicateEntry(msg) => PortError::conflict(msg),
            DatabaseError::ForeignKeyViolation(msg) => PortError::reference("reference", msg),
            DatabaseError::ConstraintViolation(msg) => PortError::validation(msg),
            transient @ (DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted) => {
                PortError::Connection {
                    message: transient.to_string(),
                    source: Some(Box::new(transient)),
                }
            }
            other => PortError::Internal {
                message: other.to_string(),
                source: Some(Box::new(other)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_keeps_entity_and_id() {
        let port: PortError = DatabaseError::not_found("Product", 3).into();
        assert!(port.is_not_found());
        assert_eq!(port.to_string(), "Product with passed id:3 not exists");
    }

    #[test]
    fn test_constraint_classification() {
        assert!(DatabaseError::DuplicateEntry("x".into()).is_constraint_violation());
        assert!(DatabaseError::ForeignKeyViolation("x".into()).is_constraint_violation());
        assert!(!DatabaseError::PoolExhausted.is_constraint_violation());
        assert!(DatabaseError::PoolExhausted.is_connection_error());
    }

    #[test]
    fn test_pool_timeout_is_transient() {
        let db: DatabaseError = sqlx::Error::PoolTimedOut.into();
        let port: PortError = db.into();
        assert!(port.is_transient());
    }

    #[test]
    fn test_missing_reference_maps_to_reference() {
        let port: PortError =
            DatabaseError::missing_reference("customer", "customer with passed id:9 not exists").into();
        assert!(port.is_reference());
        assert_eq!(port.to_string(), "customer with passed id:9 not exists");
    }
}
