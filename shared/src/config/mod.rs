//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `verification` - Pin expiry, lockout, cooldown and attempt policy
//! - `database` - Database connection and pool configuration
//! - `email` - SMTP relay and pin message settings
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server configuration

pub mod database;
pub mod email;
pub mod environment;
pub mod server;
pub mod verification;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use database::DatabaseConfig;
pub use email::{EmailConfig, EmailProvider};
pub use environment::{Environment, LoggingConfig};
pub use server::ServerConfig;
pub use verification::VerificationConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Email delivery configuration
    pub email: EmailConfig,

    /// Verification policy
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            email: EmailConfig::from_env(),
            verification: VerificationConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }
}
