//! Bill API Server Binary
//!
//! This binary starts the HTTP API server for products, customers and bills.
//!
//! # Usage
//!
//! ```bash
//! # Recreate the schema, load demo data, then serve
//! cargo run --bin bill-api -- --migratedb --seeddb
//!
//! # Run with environment variables
//! API_PORT=8000 DATABASE_URL=postgresql://... cargo run --bin bill-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8000)
//! * `API_LOG_LEVEL` - Log level when `RUST_LOG` is unset (default: info)
//! * `API_REQUEST_TIMEOUT_SECS` - Per-request timeout (default: 30)
//! * `API_DATABASE__HOST`, `API_DATABASE__PORT`, `API_DATABASE__DATABASE`,
//!   `API_DATABASE__USERNAME`, `API_DATABASE__PASSWORD` - Connection parts
//! * `API_DATABASE__CONNECT_ATTEMPTS` - Startup connection attempts (default: 5)
//! * `API_DATABASE__CONNECT_RETRY_DELAY_SECS` - Delay between attempts (default: 3)
//! * `API_DATABASE__SCRIPTS_PATH` - Directory with `structure.sql` and `seeder.sql`
//! * `DATABASE_URL` - Full connection string, overrides the parts

use anyhow::Context;
use clap::Parser;
use interface_api::{config::ApiConfig, create_router, AppState};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command line flags
#[derive(Debug, Parser)]
#[command(name = "bill-api", version, about = "REST API for products, customers and bills")]
struct Cli {
    /// Initialize database's structure (drops existing tables)
    #[arg(long = "migratedb")]
    migrate_db: bool,

    /// Seed database's data
    #[arg(long = "seeddb")]
    seed_db: bool,
}

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, connects to the database with a
/// bounded retry, runs the requested scripts and starts the HTTP server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("invalid configuration")?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting Bill API Server"
    );

    let pool = infra_db::connect_with_retry(&config.database.pool_config())
        .await
        .context("database is not reachable")?;

    let scripts_dir = config.database.scripts_path.as_deref();
    if cli.migrate_db {
        tracing::info!("Initialize database's structure");
        infra_db::schema::migrate(&pool, scripts_dir).await?;
    }
    if cli.seed_db {
        tracing::info!("Seeding database's data");
        infra_db::schema::seed(&pool, scripts_dir).await?;
    }

    let app = create_router(AppState::postgres(pool), &config);

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid listen address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` wins over the configured level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// In-flight requests complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
