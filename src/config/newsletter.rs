//! Newsletter provider configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// External mailing list. Absent means subscribers are only stored locally.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsletterConfig {
    /// Endpoint receiving `POST {"email": ...}`
    pub api_url: String,

    /// Bearer token
    pub api_key: SecretString,
}

impl NewsletterConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ValidationError::InvalidNewsletterUrl);
        }
        if self.api_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("NEWSLETTER__API_KEY"));
        }
        Ok(())
    }
}
