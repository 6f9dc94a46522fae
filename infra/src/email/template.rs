//! HTML body of the pin message

use crate::InfrastructureError;

/// Placeholder replaced by the pin
pub const PIN_PLACEHOLDER: &str = "{{pin}}";

/// Built-in page used when no template file is configured
pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Verification</title>
</head>
<body style="font-family: Arial, sans-serif; text-align: center;">
    <h2>Your verification pin</h2>
    <p>Enter this pin to confirm your email address:</p>
    <p style="font-size: 32px; letter-spacing: 8px; font-weight: bold;">{{pin}}</p>
    <p>If you did not request this pin, you can ignore this email.</p>
</body>
</html>
"#;

/// Pin message template
#[derive(Debug, Clone)]
pub struct PinTemplate {
    html: String,
}

impl PinTemplate {
    /// Parse a template, which must contain the `{{pin}}` placeholder
    pub fn new(html: impl Into<String>) -> Result<Self, InfrastructureError> {
        let html = html.into();
        if !html.contains(PIN_PLACEHOLDER) {
            return Err(InfrastructureError::Config(format!(
                "Email template has no {} placeholder",
                PIN_PLACEHOLDER
            )));
        }
        Ok(Self { html })
    }

    /// Read a template file
    pub fn from_file(path: &str) -> Result<Self, InfrastructureError> {
        let html = std::fs::read_to_string(path)?;
        Self::new(html)
    }

    /// Template from `path`, or the built-in one when no path is set
    pub fn load(path: Option<&str>) -> Result<Self, InfrastructureError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn render(&self, pin: &str) -> String {
        self.html.replace(PIN_PLACEHOLDER, &escape_html(pin))
    }
}

impl Default for PinTemplate {
    fn default() -> Self {
        Self {
            html: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
