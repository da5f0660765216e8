//! In-memory post store.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::content::{Post, PostStatus};
use crate::domain::foundation::{CategoryId, DomainError, ErrorCode, PostId, Timestamp};
use crate::ports::{PostCounts, PostOrdering, PostRepository, PublishedPostQuery};

#[derive(Debug, Clone, Default)]
pub struct InMemoryPostRepository {
    posts: Arc<RwLock<HashMap<PostId, Post>>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, DomainError> {
        Ok(self.posts.read().await.get(id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, DomainError> {
        Ok(self
            .posts
            .read()
            .await
            .values()
            .find(|p| p.slug == slug)
            .cloned())
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, DomainError> {
        Ok(self.posts.read().await.values().any(|p| p.slug == slug))
    }

    async fn list_all(&self) -> Result<Vec<Post>, DomainError> {
        let mut posts: Vec<Post> = self.posts.read().await.values().cloned().collect();
        posts.sort_by_key(|p| Reverse(p.created_at));
        Ok(posts)
    }

    async fn list_published(&self, query: PublishedPostQuery) -> Result<Vec<Post>, DomainError> {
        let mut posts: Vec<Post> = self
            .posts
            .read()
            .await
            .values()
            .filter(|p| p.is_publicly_visible(&query.now))
            .filter(|p| query.category_id.map_or(true, |c| p.category_id == c))
            .cloned()
            .collect();

        match query.ordering {
            PostOrdering::Latest => posts.sort_by_key(|p| Reverse(p.publish_at)),
            PostOrdering::Trending => posts.sort_by_key(|p| Reverse(p.views)),
        }
        posts.truncate(query.limit as usize);
        Ok(posts)
    }

    async fn count_by_category(&self, category_id: &CategoryId) -> Result<u64, DomainError> {
        Ok(self
            .posts
            .read()
            .await
            .values()
            .filter(|p| &p.category_id == category_id)
            .count() as u64)
    }

    async fn counts(
        &self,
        day_start: &Timestamp,
        now: &Timestamp,
    ) -> Result<PostCounts, DomainError> {
        let posts = self.posts.read().await;
        let mut counts = PostCounts {
            total: posts.len() as u64,
            ..PostCounts::default()
        };
        for post in posts.values() {
            match (post.status, post.publish_at) {
                (PostStatus::Published, Some(at)) if !at.is_before(day_start) => {
                    counts.published_today += 1;
                }
                (PostStatus::Scheduled, Some(at)) if at.is_after(now) => {
                    counts.scheduled_upcoming += 1;
                }
                _ => {}
            }
        }
        Ok(counts)
    }

    async fn list_recent_editorial(&self, limit: u32) -> Result<Vec<Post>, DomainError> {
        let mut posts: Vec<Post> = self
            .posts
            .read()
            .await
            .values()
            .filter(|p| matches!(p.status, PostStatus::Published | PostStatus::Scheduled))
            .cloned()
            .collect();
        posts.sort_by_key(|p| Reverse(p.created_at));
        posts.truncate(limit as usize);
        Ok(posts)
    }

    async fn create(&self, post: &Post) -> Result<(), DomainError> {
        let mut posts = self.posts.write().await;
        if posts.values().any(|p| p.slug == post.slug) {
            return Err(DomainError::new(
                ErrorCode::AlreadyExists,
                format!("Slug '{}' is taken", post.slug),
            ));
        }
        posts.insert(post.id, post.clone());
        Ok(())
    }

    async fn update(&self, post: &Post) -> Result<(), DomainError> {
        let mut posts = self.posts.write().await;
        match posts.get_mut(&post.id) {
            Some(stored) => {
                *stored = post.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::PostNotFound,
                format!("Post not found: {}", post.id),
            )),
        }
    }

    async fn delete(&self, id: &PostId) -> Result<bool, DomainError> {
        Ok(self.posts.write().await.remove(id).is_some())
    }

    async fn increment_views(&self, id: &PostId) -> Result<(), DomainError> {
        if let Some(post) = self.posts.write().await.get_mut(id) {
            post.views += 1;
        }
        Ok(())
    }
}
