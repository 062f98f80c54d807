//! Schema and seed scripts
//!
//! `structure.sql` recreates the four tables and `seeder.sql` loads demo rows.
//! Both ship embedded in the binary; when a scripts directory is configured the
//! files are read from there instead, so operators can edit them without a
//! rebuild. Each script runs in its own transaction.

use std::path::Path;

use sqlx::PgPool;
use tracing::info;

use crate::error::DatabaseError;

const STRUCTURE_SQL: &str = include_str!("../../../migrations/structure.sql");
const SEEDER_SQL: &str = include_str!("../../../migrations/seeder.sql");

/// The SQL scripts the server can run at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    /// Drops and recreates the tables
    Structure,
    /// Inserts demo products and customers
    Seeder,
}

impl Script {
    pub fn file_name(self) -> &'static str {
        match self {
            Script::Structure => "structure.sql",
            Script::Seeder => "seeder.sql",
        }
    }

    /// The copy compiled into the binary
    pub fn embedded(self) -> &'static str {
        match self {
            Script::Structure => STRUCTURE_SQL,
            Script::Seeder => SEEDER_SQL,
        }
    }

    /// Loads the script from `scripts_dir`, or the embedded copy when `None`
    pub async fn load(self, scripts_dir: Option<&Path>) -> Result<String, DatabaseError> {
        match scripts_dir {
            Some(dir) => {
                let path = dir.join(self.file_name());
                tokio::fs::read_to_string(&path).await.map_err(|e| {
                    DatabaseError::MigrationFailed(format!("cannot read {}: {}", path.display(), e))
                })
            }
            None => Ok(self.embedded().to_string()),
        }
    }
}

/// Executes a script in one transaction; nothing is applied if any statement fails
pub async fn run_script(
    pool: &PgPool,
    script: Script,
    scripts_dir: Option<&Path>,
) -> Result<(), DatabaseError> {
    let sql = script.load(scripts_dir).await?;
    info!(script = script.file_name(), "Executing SQL script");

    let mut tx = pool.begin().await?;
    sqlx::raw_sql(&sql)
        .execute(&mut *tx)
        .await
        .map_err(|e| DatabaseError::MigrationFailed(format!("{}: {}", script.file_name(), e)))?;
    tx.commit().await?;
    Ok(())
}

/// Recreates the database structure
pub async fn migrate(pool: &PgPool, scripts_dir: Option<&Path>) -> Result<(), DatabaseError> {
    run_script(pool, Script::Structure, scripts_dir).await
}

/// Loads the seed data
pub async fn seed(pool: &PgPool, scripts_dir: Option<&Path>) -> Result<(), DatabaseError> {
    run_script(pool, Script::Seeder, scripts_dir).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_structure_defines_all_tables() {
        let sql = Script::Structure.embedded();
        for table in ["product", "customer", "bill", "productbill"] {
            assert!(sql.contains(&format!("CREATE TABLE {} (", table)), "missing {}", table);
        }
        assert!(sql.contains("ON DELETE CASCADE"));
    }

    #[tokio::test]
    async fn test_load_reports_missing_file() {
        let err = Script::Seeder
            .load(Some(Path::new("/nonexistent/scripts")))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::MigrationFailed(_)));
        assert!(err.to_string().contains("seeder.sql"));
    }

    #[tokio::test]
    async fn test_load_defaults_to_embedded() {
        let sql = Script::Seeder.load(None).await.unwrap();
        assert!(sql.contains("INSERT INTO product"));
    }
}
