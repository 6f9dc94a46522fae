//! Email Module
//!
//! Delivers verification pins by email.
//!
//! ## Features
//!
//! - **SMTP delivery**: lettre async transport with STARTTLS and credentials
//! - **Mock implementation**: logs pins for development
//! - **HTML template**: pin substituted into a configurable page
//! - **Security**: addresses are masked in logs

use std::sync::Arc;

use mp_core::services::verification::EmailNotifier;
use mp_shared::config::{EmailConfig, EmailProvider};

use crate::InfrastructureError;

pub mod mock_email;
pub mod smtp;
pub mod template;

pub use mock_email::MockEmailNotifier;
pub use smtp::SmtpEmailNotifier;
pub use template::PinTemplate;


/// Create an email notifier based on configuration
///
/// # Arguments
///
/// * `config` - Email configuration containing provider settings
///
/// # Returns
///
/// The notifier for the configured provider, or an error when the SMTP
/// transport or the template cannot be set up
pub fn create_notifier(config: &EmailConfig) -> Result<Arc<dyn EmailNotifier>, InfrastructureError> {
    match config.provider {
        EmailProvider::Smtp => {
            let notifier = SmtpEmailNotifier::new(config)?;
            tracing::info!(
                host = %config.smtp_host,
                port = config.smtp_port,
                "Using SMTP email delivery"
            );
            Ok(Arc::new(notifier))
        }
        EmailProvider::Mock => {
            tracing::warn!("Using mock email delivery, pins are only logged");
            Ok(Arc::new(MockEmailNotifier::new()))
        }
    }
}
