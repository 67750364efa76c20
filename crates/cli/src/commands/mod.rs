//! CLI subcommands.

pub mod customers;
pub mod migrate;

use customer_management_server::config::{ConfigError, ServerConfig};
use sqlx::PgPool;

/// Load server configuration and open a pool.
async fn connect() -> Result<PgPool, ConnectError> {
    let config = ServerConfig::from_env()?;

    tracing::info!("Connecting to customer database...");
    let pool = customer_management_server::db::create_pool(&config.database_url).await?;
    Ok(pool)
}

/// Errors opening the database connection.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),
}
