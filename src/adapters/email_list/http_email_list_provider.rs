//! Bearer-token JSON POST to an external mailing list service.
//!
//! The request body is `{"email": "<address>"}`. Any 2xx counts as success.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::debug;

use crate::domain::content::EmailAddress;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::EmailListProvider;

#[derive(Clone)]
pub struct EmailListConfig {
    api_url: String,
    api_key: SecretString,
    timeout: Duration,
}

impl EmailListConfig {
    pub fn new(api_url: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            api_url: api_url.into(),
            api_key,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for EmailListConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailListConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Serialize)]
struct SubscribeBody<'a> {
    email: &'a str,
}

pub struct HttpEmailListProvider {
    config: EmailListConfig,
    client: Client,
}

impl HttpEmailListProvider {
    pub fn new(config: EmailListConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| external(format!("HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }
}

fn external(message: impl Into<String>) -> DomainError {
    DomainError::new(ErrorCode::ExternalServiceError, message)
}

#[async_trait]
impl EmailListProvider for HttpEmailListProvider {
    async fn subscribe(&self, email: &EmailAddress) -> Result<(), DomainError> {
        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&SubscribeBody {
                email: email.as_str(),
            })
            .send()
            .await
            .map_err(|e| external(format!("Email list request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(external(format!("Email list API error ({}): {}", status, body))
                .with_detail("status", status.as_u16().to_string()));
        }

        debug!(email = %email, "Synced subscriber to email list");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_hides_api_key() {
        let config = EmailListConfig::new(
            "https://lists.example.com/subscribe",
            SecretString::new("key_live_abc".to_string()),
        );
        let debug = format!("{:?}", config);
        assert!(!debug.contains("key_live_abc"));
        assert!(debug.contains("lists.example.com"));
    }

    #[test]
    fn body_serializes_as_email_object() {
        let json = serde_json::to_string(&SubscribeBody { email: "a@b.io" }).unwrap();
        assert_eq!(json, r#"{"email":"a@b.io"}"#);
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_external_service_error() {
        let provider = HttpEmailListProvider::new(
            EmailListConfig::new(
                "http://127.0.0.1:9/subscribe",
                SecretString::new("k".to_string()),
            )
            .with_timeout(Duration::from_millis(500)),
        )
        .unwrap();
        let err = provider
            .subscribe(&EmailAddress::parse("reader@example.com").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ExternalServiceError);
    }
}
