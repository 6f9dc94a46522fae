//! Email delivery configuration

use serde::{Deserialize, Serialize};

/// Email delivery provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Deliver through an SMTP relay
    Smtp,
    /// Log the pin instead of sending it (development only)
    Mock,
}

impl std::str::FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "smtp" => Ok(EmailProvider::Smtp),
            "mock" => Ok(EmailProvider::Mock),
            _ => Err(format!("Invalid email provider: {}", s)),
        }
    }
}

/// SMTP and message settings used to deliver pins
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Which delivery backend to use
    pub provider: EmailProvider,

    /// SMTP server hostname
    pub smtp_host: String,

    /// SMTP server port (587 for STARTTLS)
    pub smtp_port: u16,

    /// Username for SMTP authentication
    #[serde(default)]
    pub smtp_username: Option<String>,

    /// Password for SMTP authentication
    #[serde(default)]
    pub smtp_password: Option<String>,

    /// Use STARTTLS when connecting to the relay
    #[serde(default = "default_starttls")]
    pub starttls: bool,

    /// Sender address
    pub from_address: String,

    /// Optional copy recipient for every pin message
    #[serde(default)]
    pub cc_address: Option<String>,

    /// Subject line of the pin message
    pub subject: String,

    /// Path to an HTML template containing a `{{pin}}` placeholder
    #[serde(default)]
    pub template_path: Option<String>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::Mock,
            smtp_host: String::from("localhost"),
            smtp_port: 587,
            smtp_username: None,
            smtp_password: None,
            starttls: default_starttls(),
            from_address: String::from("no-reply@mailpin.local"),
            cc_address: None,
            subject: String::from("Your verification pin"),
            template_path: None,
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    ///
    /// Reads `EMAIL_PROVIDER`, `SMTP_HOST`, `SMTP_PORT`, `SMTP_USERNAME`,
    /// `SMTP_PASSWORD`, `SMTP_STARTTLS`, `SMTP_FROM`, `SMTP_CC`,
    /// `EMAIL_SUBJECT` and `EMAIL_TEMPLATE_PATH`.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            provider: std::env::var("EMAIL_PROVIDER")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.provider),
            smtp_host: std::env::var("SMTP_HOST").unwrap_or(defaults.smtp_host),
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.smtp_port),
            smtp_username: std::env::var("SMTP_USERNAME").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
            starttls: std::env::var("SMTP_STARTTLS")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(defaults.starttls),
            from_address: std::env::var("SMTP_FROM").unwrap_or(defaults.from_address),
            cc_address: std::env::var("SMTP_CC").ok(),
            subject: std::env::var("EMAIL_SUBJECT").unwrap_or(defaults.subject),
            template_path: std::env::var("EMAIL_TEMPLATE_PATH").ok(),
        }
    }

    /// Use an SMTP relay with the given host
    pub fn smtp(host: impl Into<String>) -> Self {
        Self {
            provider: EmailProvider::Smtp,
            smtp_host: host.into(),
            ..Default::default()
        }
    }

    /// Set authentication credentials
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.smtp_username = Some(username.into());
        self.smtp_password = Some(password.into());
        self
    }

    /// Set the sender address
    pub fn with_from(mut self, address: impl Into<String>) -> Self {
        self.from_address = address.into();
        self
    }

    /// Check if credentials are configured
    pub fn has_credentials(&self) -> bool {
        self.smtp_username.is_some() && self.smtp_password.is_some()
    }
}

fn default_starttls() -> bool {
    true
}
