//! Post repository port.

use crate::domain::content::Post;
use crate::domain::foundation::{CategoryId, DomainError, PostId, Timestamp};
use async_trait::async_trait;

/// Ordering for public listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostOrdering {
    /// Newest publication first.
    #[default]
    Latest,
    /// Most viewed first.
    Trending,
}

/// Post totals for the back-office dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PostCounts {
    pub total: u64,
    /// PUBLISHED with `publish_at` at or after the start of the day.
    pub published_today: u64,
    /// SCHEDULED with `publish_at` still in the future.
    pub scheduled_upcoming: u64,
}

/// Filter for publicly visible posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedPostQuery {
    /// Visibility is evaluated against this instant.
    pub now: Timestamp,
    pub category_id: Option<CategoryId>,
    pub ordering: PostOrdering,
    pub limit: u32,
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, DomainError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, DomainError>;

    async fn slug_exists(&self, slug: &str) -> Result<bool, DomainError>;

    /// Every post regardless of status, newest created first.
    async fn list_all(&self) -> Result<Vec<Post>, DomainError>;

    /// Published posts with `publish_at` unset or not after `query.now`.
    async fn list_published(&self, query: PublishedPostQuery) -> Result<Vec<Post>, DomainError>;

    async fn count_by_category(&self, category_id: &CategoryId) -> Result<u64, DomainError>;

    async fn counts(
        &self,
        day_start: &Timestamp,
        now: &Timestamp,
    ) -> Result<PostCounts, DomainError>;

    /// PUBLISHED and SCHEDULED posts, newest created first.
    async fn list_recent_editorial(&self, limit: u32) -> Result<Vec<Post>, DomainError>;

    /// # Errors
    ///
    /// `AlreadyExists` when the slug is taken.
    async fn create(&self, post: &Post) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// `PostNotFound` when no post has this id.
    async fn update(&self, post: &Post) -> Result<(), DomainError>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: &PostId) -> Result<bool, DomainError>;

    async fn increment_views(&self, id: &PostId) -> Result<(), DomainError>;
}
