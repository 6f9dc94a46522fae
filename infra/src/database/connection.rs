//! MySQL connection pool

use std::fmt;
use std::time::Duration;

use mp_shared::config::DatabaseConfig;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

use crate::InfrastructureError;

/// Shared MySQL connection pool
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
    config: DatabaseConfig,
}

impl DatabasePool {
    /// Connect to the database described by `config`
    pub async fn new(config: DatabaseConfig) -> Result<Self, InfrastructureError> {
        if !config.url.starts_with("mysql://") {
            return Err(InfrastructureError::Config(format!(
                "Unsupported database URL scheme: {}",
                config.url.split("://").next().unwrap_or_default()
            )));
        }

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            .connect(&config.url)
            .await?;

        tracing::info!(
            max_connections = config.max_connections,
            "Database connection pool created"
        );

        Ok(Self { pool, config })
    }

    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Run a trivial query to check the database is reachable
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(true)
    }

    pub fn statistics(&self) -> PoolStatistics {
        PoolStatistics {
            connections: self.pool.size(),
            idle_connections: self.pool.num_idle() as u32,
            max_connections: self.config.max_connections,
        }
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Snapshot of pool usage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStatistics {
    pub connections: u32,
    pub idle_connections: u32,
    pub max_connections: u32,
}

impl fmt::Display for PoolStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} connections ({} idle)",
            self.connections, self.max_connections, self.idle_connections
        )
    }
}
