//! API configuration
//!
//! Values come from environment variables prefixed with `API_`, nested keys
//! separated by `__` (for example `API_DATABASE__HOST`). Anything unset keeps
//! its default. `DATABASE_URL`, when present, replaces the URL assembled from
//! the database settings.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use infra_db::DatabaseConfig;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
    /// Requests running longer than this are cancelled
    pub request_timeout_secs: u64,
    /// Database connection settings
    pub database: DatabaseSettings,
}

/// Database connection settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    pub max_connections: u32,
    /// Startup connection attempts before giving up
    pub connect_attempts: u32,
    pub connect_retry_delay_secs: u64,
    /// Directory holding `structure.sql` and `seeder.sql`; embedded copies when unset
    pub scripts_path: Option<PathBuf>,
    /// Full connection URL, overriding the parts above
    pub url: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            log_level: "info".to_string(),
            request_timeout_secs: 30,
            database: DatabaseSettings::default(),
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            database: "bills".to_string(),
            username: "postgres".to_string(),
            password: "postgres".to_string(),
            max_connections: 10,
            connect_attempts: 5,
            connect_retry_delay_secs: 3,
            scripts_path: None,
            url: None,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from the process environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_environment(
            config::Environment::with_prefix("API"),
            std::env::var("DATABASE_URL").ok(),
        )
    }

    /// Loads configuration from the given environment source
    ///
    /// Split from `from_env` so tests can pass a fixed variable map.
    pub fn from_environment(
        environment: config::Environment,
        database_url: Option<String>,
    ) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                environment
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("database.url", database_url)?
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl DatabaseSettings {
    /// The connection URL, either configured directly or assembled from parts
    pub fn connection_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!(
                "postgresql://{}:{}@{}:{}/{}",
                self.username, self.password, self.host, self.port, self.database
            ),
        }
    }

    /// Pool settings including the startup retry policy
    pub fn pool_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(self.connection_url())
            .max_connections(self.max_connections)
            .connect_attempts(self.connect_attempts)
            .retry_delay(Duration::from_secs(self.connect_retry_delay_secs))
    }
}
