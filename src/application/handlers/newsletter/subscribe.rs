//! SubscribeHandler - adds an address to the newsletter.
//!
//! The local list is authoritative. Forwarding to the external mailing list
//! is best effort and never fails the request.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::content::{ContentError, EmailAddress, NewsletterSubscriber};
use crate::domain::foundation::{Clock, ErrorCode};
use crate::ports::{EmailListProvider, NewsletterRepository};

#[derive(Debug, Clone)]
pub struct SubscribeCommand {
    /// Raw address as submitted.
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    Subscribed,
    AlreadySubscribed,
}

impl SubscribeOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            SubscribeOutcome::Subscribed => "Successfully subscribed!",
            SubscribeOutcome::AlreadySubscribed => "You are already subscribed!",
        }
    }
}

pub type SubscribeResult = SubscribeOutcome;

pub struct SubscribeHandler {
    subscribers: Arc<dyn NewsletterRepository>,
    email_list: Option<Arc<dyn EmailListProvider>>,
    clock: Arc<dyn Clock>,
}

impl SubscribeHandler {
    pub fn new(
        subscribers: Arc<dyn NewsletterRepository>,
        email_list: Option<Arc<dyn EmailListProvider>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            subscribers,
            email_list,
            clock,
        }
    }

    pub async fn handle(&self, cmd: SubscribeCommand) -> Result<SubscribeResult, ContentError> {
        let email = EmailAddress::parse(&cmd.email)?;

        if self.subscribers.find_by_email(&email).await?.is_some() {
            return Ok(SubscribeOutcome::AlreadySubscribed);
        }

        let subscriber = NewsletterSubscriber::new(email, self.clock.now());
        match self.subscribers.create(&subscriber).await {
            Ok(()) => {}
            // Lost a race with a concurrent signup for the same address.
            Err(err) if err.code == ErrorCode::AlreadyExists => {
                return Ok(SubscribeOutcome::AlreadySubscribed);
            }
            Err(err) => return Err(err.into()),
        }
        info!(subscriber_id = %subscriber.id, "Newsletter subscriber added");

        if let Some(email_list) = &self.email_list {
            if let Err(err) = email_list.subscribe(&subscriber.email).await {
                warn!(subscriber_id = %subscriber.id, error = %err, "Mailing list sync failed");
            }
        }

        Ok(SubscribeOutcome::Subscribed)
    }
}
