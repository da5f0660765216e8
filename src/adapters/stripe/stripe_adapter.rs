//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` port against the Stripe REST API:
//! webhook verification and translation, checkout sessions and billing
//! portal sessions.
//!
//! # Security
//!
//! - HMAC-SHA256 signature verification with constant-time comparison
//! - Timestamp validation (5-minute window) for replay protection
//! - Secrets handled via `secrecy::SecretString`

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error, warn};

use crate::domain::foundation::{Clock, Timestamp, UserId};
use crate::domain::membership::{
    BillingEvent, BillingEventKind, CheckoutCompleted, ProviderSubscriptionStatus,
    SubscriptionUpdated, WebhookSignatureVerifier,
};
use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentErrorCode, PaymentProvider,
    PortalSession,
};

use super::webhook_types::{
    ExpandableSubscription, StripeCheckoutSession, StripeErrorResponse, StripePortalSession,
    StripeSubscription, StripeWebhookEvent,
};

const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";

/// Checkout metadata key carrying the local user id.
const USER_ID_METADATA_KEY: &str = "userId";

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Webhook signing secret (whsec_...).
    webhook_secret: SecretString,

    /// Recurring price used for new subscriptions.
    price_id: String,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,

    request_timeout: Duration,
}

impl StripeConfig {
    pub fn new(
        api_key: SecretString,
        webhook_secret: SecretString,
        price_id: impl Into<String>,
    ) -> Self {
        Self {
            api_key,
            webhook_secret,
            price_id: price_id.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field("api_key", &"[REDACTED]")
            .field("webhook_secret", &"[REDACTED]")
            .field("price_id", &self.price_id)
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Stripe payment provider adapter.
pub struct StripePaymentAdapter {
    config: StripeConfig,
    verifier: WebhookSignatureVerifier,
    http_client: reqwest::Client,
    clock: Arc<dyn Clock>,
}

impl StripePaymentAdapter {
    /// # Errors
    ///
    /// Fails when the HTTP client cannot be built (TLS backend unavailable).
    pub fn new(config: StripeConfig, clock: Arc<dyn Clock>) -> Result<Self, PaymentError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| PaymentError::provider(format!("HTTP client: {}", e)))?;
        let verifier = WebhookSignatureVerifier::new(config.webhook_secret.expose_secret().clone());

        Ok(Self {
            config,
            verifier,
            http_client,
            clock,
        })
    }

    /// Translate a verified envelope into a provider-neutral event.
    async fn translate(&self, event: StripeWebhookEvent) -> Result<BillingEvent, PaymentError> {
        let occurred_at = Timestamp::from_unix_secs(event.created)
            .ok_or_else(|| PaymentError::invalid_payload("Invalid event timestamp"))?;

        let kind = match event.event_type.as_str() {
            "checkout.session.completed" => {
                let session: StripeCheckoutSession = parse_object(&event)?;
                BillingEventKind::CheckoutCompleted(self.checkout_completed(session).await?)
            }
            "customer.subscription.updated" => {
                let sub: StripeSubscription = parse_object(&event)?;
                BillingEventKind::SubscriptionUpdated(SubscriptionUpdated {
                    customer_id: sub.customer,
                    status: ProviderSubscriptionStatus::parse(&sub.status),
                    current_period_end: period_end(sub.current_period_end),
                })
            }
            "customer.subscription.deleted" => {
                let sub: StripeSubscription = parse_object(&event)?;
                BillingEventKind::SubscriptionDeleted {
                    customer_id: sub.customer,
                }
            }
            other => BillingEventKind::Unknown {
                event_type: other.to_string(),
            },
        };

        Ok(BillingEvent {
            event_id: event.id,
            occurred_at,
            kind,
        })
    }

    async fn checkout_completed(
        &self,
        session: StripeCheckoutSession,
    ) -> Result<CheckoutCompleted, PaymentError> {
        let user_id = session
            .metadata
            .get(USER_ID_METADATA_KEY)
            .and_then(|raw| UserId::new(raw.as_str()).ok());

        let (subscription_id, current_period_end) = match session.subscription {
            Some(ExpandableSubscription::Object(sub)) => {
                (Some(sub.id), period_end(sub.current_period_end))
            }
            Some(ExpandableSubscription::Id(id)) => {
                let sub = self.retrieve_subscription(&id).await?;
                (Some(id), period_end(sub.current_period_end))
            }
            None => (None, None),
        };

        Ok(CheckoutCompleted {
            user_id,
            customer_id: session.customer,
            subscription_id,
            current_period_end,
        })
    }

    async fn retrieve_subscription(&self, id: &str) -> Result<StripeSubscription, PaymentError> {
        let url = format!("{}/v1/subscriptions/{}", self.config.api_base_url, id);

        let response = self
            .http_client
            .get(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(error_from_response("retrieve_subscription", response).await);
        }

        response
            .json()
            .await
            .map_err(|e| PaymentError::provider(format!("Failed to parse Stripe response: {}", e)))
    }
}

fn parse_object<T: serde::de::DeserializeOwned>(
    event: &StripeWebhookEvent,
) -> Result<T, PaymentError> {
    serde_json::from_value(event.data.object.clone()).map_err(|e| {
        PaymentError::invalid_payload(format!("Invalid {} object: {}", event.event_type, e))
    })
}

fn period_end(secs: Option<i64>) -> Option<Timestamp> {
    secs.and_then(Timestamp::from_unix_secs)
}

async fn error_from_response(operation: &str, response: reqwest::Response) -> PaymentError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let parsed = serde_json::from_str::<StripeErrorResponse>(&body).ok();

    let message = parsed
        .as_ref()
        .and_then(|e| e.error.message.clone())
        .unwrap_or_else(|| format!("Stripe API error ({})", status));
    let code = match status.as_u16() {
        401 | 403 => PaymentErrorCode::AuthenticationError,
        404 => PaymentErrorCode::NotFound,
        429 => PaymentErrorCode::RateLimitExceeded,
        500..=599 => PaymentErrorCode::NetworkError,
        _ => PaymentErrorCode::ProviderError,
    };

    error!(operation, status = status.as_u16(), error = %message, "Stripe request failed");

    let mut err = PaymentError::new(code, message);
    if let Some(provider_code) = parsed.and_then(|e| e.error.code) {
        err = err.with_provider_code(provider_code);
    }
    err
}

#[async_trait]
impl PaymentProvider for StripePaymentAdapter {
    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<BillingEvent, PaymentError> {
        self.verifier
            .verify(payload, signature, self.clock.now().as_unix_secs())
            .map_err(|e| {
                warn!(error = %e, "Webhook signature verification failed");
                PaymentError::invalid_webhook(e.to_string())
            })?;

        let event: StripeWebhookEvent = serde_json::from_slice(payload).map_err(|e| {
            warn!(error = %e, "Failed to parse webhook payload");
            PaymentError::invalid_payload(format!("Invalid JSON: {}", e))
        })?;
        debug!(event_id = %event.id, event_type = %event.event_type, livemode = event.livemode, "Webhook verified");

        self.translate(event).await
    }

    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        let mut params = vec![
            ("mode", "subscription".to_string()),
            ("line_items[0][price]", self.config.price_id.clone()),
            ("line_items[0][quantity]", "1".to_string()),
            ("success_url", request.success_url),
            ("cancel_url", request.cancel_url),
            (
                "metadata[userId]",
                request.user_id.as_str().to_string(),
            ),
        ];
        if let Some(email) = request.email {
            params.push(("customer_email", email));
        }

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(error_from_response("create_checkout_session", response).await);
        }

        let session: StripeCheckoutSession = response.json().await.map_err(|e| {
            PaymentError::provider(format!("Failed to parse Stripe response: {}", e))
        })?;
        let url = session
            .url
            .ok_or_else(|| PaymentError::provider("Checkout session has no URL"))?;

        Ok(CheckoutSession {
            id: session.id,
            url,
        })
    }

    async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Result<PortalSession, PaymentError> {
        let url = format!("{}/v1/billing_portal/sessions", self.config.api_base_url);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(&[("customer", customer_id), ("return_url", return_url)])
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(error_from_response("create_portal_session", response).await);
        }

        let portal: StripePortalSession = response.json().await.map_err(|e| {
            PaymentError::provider(format!("Failed to parse Stripe response: {}", e))
        })?;

        Ok(PortalSession {
            id: portal.id,
            url: portal.url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::FixedClock;
    use crate::domain::membership::sign_payload;

    const SECRET: &str = "whsec_test_secret";
    const NOW: i64 = 1_720_000_000;

    fn adapter() -> StripePaymentAdapter {
        let config = StripeConfig::new(
            SecretString::new("sk_test_123".to_string()),
            SecretString::new(SECRET.to_string()),
            "price_premium",
        )
        .with_base_url("http://127.0.0.1:9");
        let clock = Timestamp::from_unix_secs(NOW).unwrap();
        StripePaymentAdapter::new(config, Arc::new(FixedClock::new(clock))).unwrap()
    }

    fn envelope(event_type: &str, object: serde_json::Value) -> String {
        serde_json::json!({
            "id": "evt_123",
            "object": "event",
            "type": event_type,
            "created": NOW - 5,
            "livemode": false,
            "data": { "object": object }
        })
        .to_string()
    }

    fn signed(payload: &str) -> String {
        sign_payload(SECRET, NOW, payload.as_bytes()).unwrap()
    }

    #[test]
    fn config_debug_redacts_secrets() {
        let config = StripeConfig::new(
            SecretString::new("sk_live_secret".to_string()),
            SecretString::new("whsec_secret".to_string()),
            "price_1",
        );
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk_live_secret"));
        assert!(!debug.contains("whsec_secret"));
        assert!(debug.contains("price_1"));
    }

    #[tokio::test]
    async fn checkout_with_expanded_subscription_translates() {
        let payload = envelope(
            "checkout.session.completed",
            serde_json::json!({
                "id": "cs_1",
                "customer": "cus_1",
                "metadata": { "userId": "user-1" },
                "subscription": {
                    "id": "sub_1",
                    "customer": "cus_1",
                    "status": "active",
                    "current_period_end": NOW + 86_400
                }
            }),
        );

        let event = adapter()
            .verify_webhook(payload.as_bytes(), &signed(&payload))
            .await
            .unwrap();

        assert_eq!(event.event_id, "evt_123");
        assert_eq!(event.occurred_at, Timestamp::from_unix_secs(NOW - 5).unwrap());
        match event.kind {
            BillingEventKind::CheckoutCompleted(c) => {
                assert_eq!(c.user_id.unwrap().as_str(), "user-1");
                assert_eq!(c.customer_id.as_deref(), Some("cus_1"));
                assert_eq!(c.subscription_id.as_deref(), Some("sub_1"));
                assert_eq!(c.current_period_end, Timestamp::from_unix_secs(NOW + 86_400));
            }
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[tokio::test]
    async fn checkout_without_subscription_needs_no_api_call() {
        let payload = envelope(
            "checkout.session.completed",
            serde_json::json!({ "id": "cs_1", "customer": "cus_1", "metadata": {} }),
        );

        let event = adapter()
            .verify_webhook(payload.as_bytes(), &signed(&payload))
            .await
            .unwrap();

        match event.kind {
            BillingEventKind::CheckoutCompleted(c) => {
                assert!(c.user_id.is_none());
                assert!(c.subscription_id.is_none());
            }
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[tokio::test]
    async fn subscription_updated_translates() {
        let payload = envelope(
            "customer.subscription.updated",
            serde_json::json!({
                "id": "sub_1",
                "customer": "cus_1",
                "status": "past_due",
                "current_period_end": NOW + 100
            }),
        );

        let event = adapter()
            .verify_webhook(payload.as_bytes(), &signed(&payload))
            .await
            .unwrap();

        assert_eq!(
            event.kind,
            BillingEventKind::SubscriptionUpdated(SubscriptionUpdated {
                customer_id: "cus_1".to_string(),
                status: ProviderSubscriptionStatus::PastDue,
                current_period_end: Timestamp::from_unix_secs(NOW + 100),
            })
        );
    }

    #[tokio::test]
    async fn subscription_deleted_translates() {
        let payload = envelope(
            "customer.subscription.deleted",
            serde_json::json!({ "id": "sub_1", "customer": "cus_9", "status": "canceled" }),
        );

        let event = adapter()
            .verify_webhook(payload.as_bytes(), &signed(&payload))
            .await
            .unwrap();

        assert_eq!(
            event.kind,
            BillingEventKind::SubscriptionDeleted {
                customer_id: "cus_9".to_string()
            }
        );
    }

    #[tokio::test]
    async fn unknown_event_type_is_passed_through() {
        let payload = envelope("invoice.paid", serde_json::json!({ "id": "in_1" }));
        let event = adapter()
            .verify_webhook(payload.as_bytes(), &signed(&payload))
            .await
            .unwrap();
        assert_eq!(
            event.kind,
            BillingEventKind::Unknown {
                event_type: "invoice.paid".to_string()
            }
        );
    }

    #[tokio::test]
    async fn wrong_secret_is_invalid_webhook() {
        let payload = envelope("invoice.paid", serde_json::json!({}));
        let header = sign_payload("whsec_other", NOW, payload.as_bytes()).unwrap();

        let err = adapter()
            .verify_webhook(payload.as_bytes(), &header)
            .await
            .unwrap_err();
        assert_eq!(err.code, PaymentErrorCode::InvalidWebhook);
    }

    #[tokio::test]
    async fn tampered_body_is_invalid_webhook() {
        let payload = envelope("invoice.paid", serde_json::json!({}));
        let header = signed(&payload);
        let tampered = payload.replace("evt_123", "evt_999");

        let err = adapter()
            .verify_webhook(tampered.as_bytes(), &header)
            .await
            .unwrap_err();
        assert_eq!(err.code, PaymentErrorCode::InvalidWebhook);
    }

    #[tokio::test]
    async fn expired_signature_is_invalid_webhook() {
        let payload = envelope("invoice.paid", serde_json::json!({}));
        let header = sign_payload(SECRET, NOW - 301, payload.as_bytes()).unwrap();

        let err = adapter()
            .verify_webhook(payload.as_bytes(), &header)
            .await
            .unwrap_err();
        assert_eq!(err.code, PaymentErrorCode::InvalidWebhook);
    }

    #[tokio::test]
    async fn malformed_header_is_invalid_webhook() {
        let err = adapter()
            .verify_webhook(b"{}", "garbage")
            .await
            .unwrap_err();
        assert_eq!(err.code, PaymentErrorCode::InvalidWebhook);
    }

    #[tokio::test]
    async fn signed_non_json_is_invalid_payload() {
        let payload = "not json";
        let err = adapter()
            .verify_webhook(payload.as_bytes(), &signed(payload))
            .await
            .unwrap_err();
        assert_eq!(err.code, PaymentErrorCode::InvalidPayload);
    }

    #[tokio::test]
    async fn signed_event_with_wrong_object_shape_is_invalid_payload() {
        let payload = envelope(
            "customer.subscription.updated",
            serde_json::json!({ "id": "sub_1" }),
        );
        let err = adapter()
            .verify_webhook(payload.as_bytes(), &signed(&payload))
            .await
            .unwrap_err();
        assert_eq!(err.code, PaymentErrorCode::InvalidPayload);
    }
}
