//! Newsletter subscriber repository port.

use crate::domain::content::{EmailAddress, NewsletterSubscriber};
use crate::domain::foundation::DomainError;
use async_trait::async_trait;

#[async_trait]
pub trait NewsletterRepository: Send + Sync {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<NewsletterSubscriber>, DomainError>;

    /// Every subscriber, newest first.
    async fn list_newest_first(&self) -> Result<Vec<NewsletterSubscriber>, DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;

    /// # Errors
    ///
    /// `AlreadyExists` when the address is already subscribed.
    async fn create(&self, subscriber: &NewsletterSubscriber) -> Result<(), DomainError>;
}
