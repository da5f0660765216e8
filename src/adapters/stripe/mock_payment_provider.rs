//! Mock payment provider for testing.
//!
//! Configurable implementation of `PaymentProvider` for unit and integration
//! tests. Supports:
//! - Pre-configured sessions and webhook events
//! - Error injection
//! - Call tracking

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::foundation::Timestamp;
use crate::domain::membership::{BillingEvent, BillingEventKind};
use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentProvider, PortalSession,
};

/// Mock payment provider for testing.
///
/// Clones share state, so a test can keep a handle after passing the mock to
/// a handler as `Arc<dyn PaymentProvider>`.
#[derive(Default, Clone)]
pub struct MockPaymentProvider {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Returned by every successful `verify_webhook` call.
    webhook_event: Option<BillingEvent>,

    next_checkout: Option<CheckoutSession>,
    next_portal: Option<PortalSession>,

    /// Error to return on next call (consumed).
    next_error: Option<PaymentError>,

    /// Sticky errors by method name.
    method_errors: HashMap<String, PaymentError>,

    call_log: Vec<MethodCall>,

    reject_webhooks: bool,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

impl MockPaymentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock whose webhook verification always fails.
    pub fn rejecting_webhooks() -> Self {
        let mock = Self::new();
        mock.state().reject_webhooks = true;
        mock
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    pub fn set_webhook_event(&self, event: BillingEvent) {
        self.state().webhook_event = Some(event);
    }

    pub fn set_checkout_session(&self, session: CheckoutSession) {
        self.state().next_checkout = Some(session);
    }

    pub fn set_portal_session(&self, session: PortalSession) {
        self.state().next_portal = Some(session);
    }

    /// Fail the next call to any method.
    pub fn set_error(&self, error: PaymentError) {
        self.state().next_error = Some(error);
    }

    /// Fail every call to `method` until cleared.
    pub fn set_method_error(&self, method: &str, error: PaymentError) {
        self.state().method_errors.insert(method.to_string(), error);
    }

    pub fn clear_errors(&self) {
        let mut state = self.state();
        state.next_error = None;
        state.method_errors.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    pub fn calls(&self) -> Vec<MethodCall> {
        self.state().call_log.clone()
    }

    pub fn was_called(&self, method: &str) -> bool {
        self.state().call_log.iter().any(|c| c.method == method)
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.state()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Internal Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record_call(&self, method: &str, args: Vec<String>) {
        self.state().call_log.push(MethodCall {
            method: method.to_string(),
            args,
        });
    }

    fn check_error(&self, method: &str) -> Result<(), PaymentError> {
        let mut state = self.state();

        if let Some(error) = state.method_errors.get(method) {
            return Err(error.clone());
        }

        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        Ok(())
    }
}

fn short_id(prefix: &str) -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    format!("{}_mock_{}", prefix, &uuid[..8])
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<BillingEvent, PaymentError> {
        self.record_call(
            "verify_webhook",
            vec![payload.len().to_string(), signature.to_string()],
        );
        self.check_error("verify_webhook")?;

        let state = self.state();
        if state.reject_webhooks {
            return Err(PaymentError::invalid_webhook("Invalid signature"));
        }

        Ok(state.webhook_event.clone().unwrap_or_else(|| BillingEvent {
            event_id: short_id("evt"),
            occurred_at: Timestamp::now(),
            kind: BillingEventKind::Unknown {
                event_type: "mock.event".to_string(),
            },
        }))
    }

    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        self.record_call(
            "create_checkout_session",
            vec![
                request.user_id.to_string(),
                request.email.clone().unwrap_or_default(),
                request.success_url.clone(),
                request.cancel_url.clone(),
            ],
        );
        self.check_error("create_checkout_session")?;

        let next = self.state().next_checkout.take();
        Ok(next.unwrap_or_else(|| {
            let id = short_id("cs");
            CheckoutSession {
                url: format!("https://checkout.stripe.com/c/pay/{}", id),
                id,
            }
        }))
    }

    async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Result<PortalSession, PaymentError> {
        self.record_call(
            "create_portal_session",
            vec![customer_id.to_string(), return_url.to_string()],
        );
        self.check_error("create_portal_session")?;

        let next = self.state().next_portal.take();
        Ok(next.unwrap_or_else(|| {
            let id = short_id("bps");
            PortalSession {
                url: format!("https://billing.stripe.com/p/session/{}", id),
                id,
            }
        }))
    }
}
