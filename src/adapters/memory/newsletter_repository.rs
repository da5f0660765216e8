//! In-memory newsletter subscriber store.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::content::{EmailAddress, NewsletterSubscriber};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::NewsletterRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryNewsletterRepository {
    by_email: Arc<RwLock<HashMap<EmailAddress, NewsletterSubscriber>>>,
}

impl InMemoryNewsletterRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.by_email.read().await.len()
    }
}

#[async_trait]
impl NewsletterRepository for InMemoryNewsletterRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<NewsletterSubscriber>, DomainError> {
        Ok(self.by_email.read().await.get(email).cloned())
    }

    async fn list_newest_first(&self) -> Result<Vec<NewsletterSubscriber>, DomainError> {
        let mut subscribers: Vec<NewsletterSubscriber> =
            self.by_email.read().await.values().cloned().collect();
        subscribers.sort_by_key(|s| Reverse(s.created_at));
        Ok(subscribers)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.by_email.read().await.len() as u64)
    }

    async fn create(&self, subscriber: &NewsletterSubscriber) -> Result<(), DomainError> {
        let mut by_email = self.by_email.write().await;
        if by_email.contains_key(&subscriber.email) {
            return Err(DomainError::new(
                ErrorCode::AlreadyExists,
                "Email already subscribed",
            ));
        }
        by_email.insert(subscriber.email.clone(), subscriber.clone());
        Ok(())
    }
}
