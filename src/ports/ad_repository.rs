//! Ad repository port.
//!
//! Time-window eligibility is decided in the domain, not in queries, so
//! implementations return every ad for a position.

use crate::domain::ads::{Ad, AdPosition};
use crate::domain::foundation::{AdId, DomainError};
use async_trait::async_trait;

#[async_trait]
pub trait AdRepository: Send + Sync {
    /// All ads, newest created first.
    async fn list_all(&self) -> Result<Vec<Ad>, DomainError>;

    async fn list_by_position(&self, position: AdPosition) -> Result<Vec<Ad>, DomainError>;

    async fn find_by_id(&self, id: &AdId) -> Result<Option<Ad>, DomainError>;

    async fn create(&self, ad: &Ad) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// `AdNotFound` when no ad has this id.
    async fn update(&self, ad: &Ad) -> Result<(), DomainError>;

    async fn delete(&self, id: &AdId) -> Result<bool, DomainError>;
}
