//! External mailing list port.
//!
//! Optional: when no provider is configured, subscribers are only stored
//! locally.

use crate::domain::content::EmailAddress;
use crate::domain::foundation::DomainError;
use async_trait::async_trait;

#[async_trait]
pub trait EmailListProvider: Send + Sync {
    /// Add `email` to the provider's list.
    async fn subscribe(&self, email: &EmailAddress) -> Result<(), DomainError>;
}
