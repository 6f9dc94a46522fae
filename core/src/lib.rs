//! # MailPin Core
//!
//! Core business logic and domain layer for the MailPin backend.
//! This crate contains the verification records, the store interfaces that
//! persist them, the verification workflow, and the error types that form the
//! foundation of the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
