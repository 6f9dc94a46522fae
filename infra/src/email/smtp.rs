//! SMTP email notifier using lettre
//!
//! Sends the pin as an HTML message through an SMTP relay.

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use uuid::Uuid;

use mp_core::services::verification::EmailNotifier;
use mp_shared::config::EmailConfig;
use mp_shared::utils::validation::mask_email;

use super::template::PinTemplate;
use crate::InfrastructureError;

/// SMTP notifier
///
/// # Example
///
/// ```rust,ignore
/// use mp_infra::email::SmtpEmailNotifier;
/// use mp_shared::config::EmailConfig;
///
/// let config = EmailConfig::smtp("smtp.gmail.com")
///     .with_credentials("sender@gmail.com", "app-password")
///     .with_from("sender@gmail.com");
///
/// let notifier = SmtpEmailNotifier::new(&config)?;
/// notifier.send_pin("user@example.com", "123456").await?;
/// ```
pub struct SmtpEmailNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    cc: Option<Mailbox>,
    subject: String,
    template: PinTemplate,
}

impl SmtpEmailNotifier {
    /// Create a new SMTP notifier with the given configuration
    pub fn new(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        let relay = if config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
        };

        let mut builder = relay
            .map_err(|e| InfrastructureError::Email(format!("Failed to create SMTP transport: {}", e)))?
            .port(config.smtp_port);

        if let (Some(username), Some(password)) = (&config.smtp_username, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from: parse_mailbox("from", &config.from_address)?,
            cc: config
                .cc_address
                .as_deref()
                .map(|cc| parse_mailbox("cc", cc))
                .transpose()?,
            subject: config.subject.clone(),
            template: PinTemplate::load(config.template_path.as_deref())?,
        })
    }

    /// Build the pin message for one recipient
    pub fn build_message(&self, email: &str, pin: &str) -> Result<Message, InfrastructureError> {
        let to = parse_mailbox("to", email)?;

        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&self.subject)
            .header(ContentType::TEXT_HTML);

        if let Some(cc) = &self.cc {
            builder = builder.cc(cc.clone());
        }

        builder
            .body(self.template.render(pin))
            .map_err(|e| InfrastructureError::Email(format!("Failed to build email: {}", e)))
    }
}

#[async_trait]
impl EmailNotifier for SmtpEmailNotifier {
    async fn send_pin(&self, email: &str, pin: &str) -> Result<String, String> {
        let message = self.build_message(email, pin).map_err(|e| e.to_string())?;

        let response = self.transport.send(message).await.map_err(|e| {
            tracing::error!(
                email = %mask_email(email),
                error = %e,
                "SMTP relay rejected pin message"
            );
            format!("Failed to send email: {}", e)
        })?;

        let reply = response.message().collect::<Vec<_>>().join(" ");
        tracing::debug!(email = %mask_email(email), reply = %reply, "Pin message accepted");

        if reply.is_empty() {
            Ok(Uuid::new_v4().to_string())
        } else {
            Ok(reply)
        }
    }
}

fn parse_mailbox(field: &str, address: &str) -> Result<Mailbox, InfrastructureError> {
    address
        .parse()
        .map_err(|e| InfrastructureError::Email(format!("Invalid '{}' address: {}", field, e)))
}
