//! Category repository port.

use crate::domain::content::Category;
use crate::domain::foundation::{CategoryId, DomainError};
use async_trait::async_trait;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories ordered by `sort_order`, then name.
    async fn list(&self) -> Result<Vec<Category>, DomainError>;

    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, DomainError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, DomainError>;

    /// # Errors
    ///
    /// `AlreadyExists` when the slug is taken.
    async fn create(&self, category: &Category) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// `CategoryNotFound` when no category has this id, `AlreadyExists`
    /// when the new slug is taken.
    async fn update(&self, category: &Category) -> Result<(), DomainError>;

    async fn delete(&self, id: &CategoryId) -> Result<bool, DomainError>;
}
