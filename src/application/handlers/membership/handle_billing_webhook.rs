//! HandleBillingWebhookHandler - verifies a raw billing webhook and hands the
//! translated event to reconciliation.
//!
//! Nothing is read from or written to the store until the provider has
//! authenticated the payload.

use std::sync::Arc;

use tracing::warn;

use crate::domain::foundation::Clock;
use crate::domain::membership::{MembershipError, WebhookError};
use crate::ports::{MembershipRepository, PaymentError, PaymentErrorCode, PaymentProvider};

use super::reconcile_billing_event::{
    ReconcileBillingEventCommand, ReconcileBillingEventHandler, ReconcileOutcome,
};

/// Command carrying the webhook request exactly as received.
#[derive(Debug, Clone)]
pub struct HandleBillingWebhookCommand {
    /// Raw body bytes. Signatures are computed over these, not over re-encoded JSON.
    pub payload: Vec<u8>,
    /// Value of the signature header, if present.
    pub signature: Option<String>,
}

pub type HandleBillingWebhookResult = ReconcileOutcome;

pub struct HandleBillingWebhookHandler {
    payment_provider: Option<Arc<dyn PaymentProvider>>,
    reconciler: ReconcileBillingEventHandler,
}

impl HandleBillingWebhookHandler {
    /// `payment_provider` is `None` when billing is not configured.
    pub fn new(
        payment_provider: Option<Arc<dyn PaymentProvider>>,
        repository: Arc<dyn MembershipRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            payment_provider,
            reconciler: ReconcileBillingEventHandler::new(repository, clock),
        }
    }

    pub async fn handle(
        &self,
        cmd: HandleBillingWebhookCommand,
    ) -> Result<HandleBillingWebhookResult, MembershipError> {
        let provider = self
            .payment_provider
            .as_ref()
            .ok_or_else(MembershipError::billing_not_configured)?;

        let signature = cmd
            .signature
            .filter(|s| !s.trim().is_empty())
            .ok_or(WebhookError::MissingSignature)?;

        let event = provider
            .verify_webhook(&cmd.payload, &signature)
            .await
            .map_err(|err| {
                warn!(code = %err.code, error = %err.message, "Billing webhook rejected");
                map_provider_error(err)
            })?;

        self.reconciler
            .handle(ReconcileBillingEventCommand { event })
            .await
    }
}

fn map_provider_error(err: PaymentError) -> MembershipError {
    match err.code {
        PaymentErrorCode::InvalidWebhook => MembershipError::invalid_webhook_signature(err.message),
        PaymentErrorCode::InvalidPayload => MembershipError::malformed_event(err.message),
        _ => MembershipError::provider(err.message, err.retryable),
    }
}
