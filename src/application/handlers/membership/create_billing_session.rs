//! CreateBillingSessionHandler - starts a hosted checkout or opens the
//! billing portal for the signed-in reader.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::foundation::Actor;
use crate::domain::membership::MembershipError;
use crate::ports::{CreateCheckoutRequest, MembershipRepository, PaymentProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingSessionAction {
    #[default]
    Checkout,
    Portal,
}

#[derive(Debug, Clone)]
pub struct CreateBillingSessionCommand {
    pub actor: Actor,
    pub action: BillingSessionAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBillingSessionResult {
    pub url: String,
    /// The session actually opened; a portal request falls back to checkout
    /// when the reader has no billing customer yet.
    pub action: BillingSessionAction,
}

pub struct CreateBillingSessionHandler {
    repository: Arc<dyn MembershipRepository>,
    payment_provider: Option<Arc<dyn PaymentProvider>>,
    site_url: String,
}

impl CreateBillingSessionHandler {
    pub fn new(
        repository: Arc<dyn MembershipRepository>,
        payment_provider: Option<Arc<dyn PaymentProvider>>,
        site_url: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            payment_provider,
            site_url: site_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateBillingSessionCommand,
    ) -> Result<CreateBillingSessionResult, MembershipError> {
        let provider = self
            .payment_provider
            .as_ref()
            .ok_or_else(MembershipError::billing_not_configured)?;

        let membership = self.repository.find_by_user_id(&cmd.actor.user_id).await?;
        let customer_id = membership.and_then(|m| m.stripe_customer_id);

        if let (BillingSessionAction::Portal, Some(customer_id)) = (cmd.action, customer_id) {
            let return_url = format!("{}/membership", self.site_url);
            let session = provider
                .create_portal_session(&customer_id, &return_url)
                .await
                .map_err(|e| MembershipError::provider(e.message, e.retryable))?;
            info!(user_id = %cmd.actor.user_id, "Billing portal session created");
            return Ok(CreateBillingSessionResult {
                url: session.url,
                action: BillingSessionAction::Portal,
            });
        }

        let session = provider
            .create_checkout_session(CreateCheckoutRequest {
                user_id: cmd.actor.user_id.clone(),
                email: cmd.actor.email.clone(),
                success_url: format!("{}/membership?success=true", self.site_url),
                cancel_url: format!("{}/membership?canceled=true", self.site_url),
            })
            .await
            .map_err(|e| MembershipError::provider(e.message, e.retryable))?;

        info!(user_id = %cmd.actor.user_id, session_id = %session.id, "Checkout session created");
        Ok(CreateBillingSessionResult {
            url: session.url,
            action: BillingSessionAction::Checkout,
        })
    }
}
