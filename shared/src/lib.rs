//! Shared utilities and common types for MailPin server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - The `{error, value}` response envelope
//! - Utility functions (email validation, masking)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, DatabaseConfig, EmailConfig, Environment, LoggingConfig, ServerConfig,
    VerificationConfig,
};
pub use types::ResultEnvelope;
pub use utils::validation;
