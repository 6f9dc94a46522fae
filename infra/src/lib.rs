//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the MailPin service.
//! It provides the concrete implementations behind the core's store and
//! collaborator traits.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL pin, attempt and block stores using SQLx
//! - **Email**: SMTP delivery through lettre and a logging mock
//! - **Hashing**: bcrypt pin hashing

use std::sync::Arc;

use mp_core::domain::clock::{system_clock, Clock};
use mp_core::repositories::{InMemoryAttemptStore, InMemoryBlockStore, InMemoryPinStore};
use mp_core::services::verification::{
    EmailNotifier, PinHasher, VerificationService, VerificationStores,
};
use mp_shared::config::{AppConfig, VerificationConfig};

// Re-export core types for convenience
pub use mp_core::errors::*;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Email module - pin delivery
pub mod email;

/// Hashing module - one-way pin digests
pub mod hashing;

use database::{ensure_schema, DatabasePool, MySqlAttemptStore, MySqlBlockStore, MySqlPinStore};
use hashing::BcryptPinHasher;

/// Infrastructure service container
///
/// Holds everything the verification workflow needs, already wired to the
/// configured backends.
#[derive(Clone)]
pub struct InfrastructureServices {
    /// Pin, attempt and block stores
    pub stores: VerificationStores,
    /// Pin hashing
    pub hasher: Arc<dyn PinHasher>,
    /// Pin delivery
    pub notifier: Arc<dyn EmailNotifier>,
    /// Clock shared by the stores and the workflow
    pub clock: Arc<dyn Clock>,
    /// Connection pool, absent for in-memory storage
    pub database: Option<DatabasePool>,
}

impl InfrastructureServices {
    /// Services backed by process-local stores
    pub fn in_memory(hasher: Arc<dyn PinHasher>, notifier: Arc<dyn EmailNotifier>) -> Self {
        Self::in_memory_with_clock(hasher, notifier, system_clock())
    }

    /// Process-local services on a caller-supplied clock
    pub fn in_memory_with_clock(
        hasher: Arc<dyn PinHasher>,
        notifier: Arc<dyn EmailNotifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let stores = VerificationStores::new(
            Arc::new(InMemoryPinStore::with_clock(clock.clone())),
            Arc::new(InMemoryAttemptStore::with_clock(clock.clone())),
            Arc::new(InMemoryBlockStore::with_clock(clock.clone())),
        );

        Self {
            stores,
            hasher,
            notifier,
            clock,
            database: None,
        }
    }

    /// Build the verification workflow on top of these services
    pub fn verification_service(&self, config: VerificationConfig) -> VerificationService {
        VerificationService::new(
            self.stores.clone(),
            self.hasher.clone(),
            self.notifier.clone(),
            config,
        )
        .with_clock(self.clock.clone())
    }
}

/// Initialize infrastructure services
///
/// This function sets up:
/// - The MySQL connection pool and, when enabled, the schema
/// - The MySQL pin, attempt and block stores
/// - The email notifier for the configured provider
/// - The bcrypt pin hasher
pub async fn initialize(config: &AppConfig) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!("Initializing infrastructure services...");

    let pool = DatabasePool::new(config.database.clone()).await?;
    if config.database.auto_migrate {
        ensure_schema(pool.get_pool()).await?;
    }

    let clock = system_clock();
    let mysql = pool.get_pool().clone();
    let stores = VerificationStores::new(
        Arc::new(MySqlPinStore::new(mysql.clone(), clock.clone())),
        Arc::new(MySqlAttemptStore::new(mysql.clone(), clock.clone())),
        Arc::new(MySqlBlockStore::new(mysql, clock.clone())),
    );

    let notifier = email::create_notifier(&config.email)?;
    let hasher = Arc::new(BcryptPinHasher::new(config.verification.pin_hash_cost));

    tracing::info!(
        provider = ?config.email.provider,
        "Infrastructure services initialized successfully"
    );

    Ok(InfrastructureServices {
        stores,
        hasher,
        notifier,
        clock,
        database: Some(pool),
    })
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Email transport or message error
    #[error("Email error: {0}")]
    Email(String),

    /// File access error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        DomainError::Infrastructure {
            message: error.to_string(),
        }
    }
}
