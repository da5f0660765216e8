//! ListArticlesHandler - public listings of visible posts.

use std::sync::Arc;

use crate::domain::content::{ContentError, Post};
use crate::domain::foundation::Clock;
use crate::ports::{CategoryRepository, PostOrdering, PostRepository, PublishedPostQuery};

const DEFAULT_LIMIT: u32 = 20;
const MAX_LIMIT: u32 = 100;

#[derive(Debug, Clone, Default)]
pub struct ListArticlesQuery {
    /// Restrict to one section.
    pub category_slug: Option<String>,
    pub ordering: PostOrdering,
    pub limit: Option<u32>,
}

pub type ListArticlesResult = Vec<Post>;

pub struct ListArticlesHandler {
    posts: Arc<dyn PostRepository>,
    categories: Arc<dyn CategoryRepository>,
    clock: Arc<dyn Clock>,
}

impl ListArticlesHandler {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        categories: Arc<dyn CategoryRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            posts,
            categories,
            clock,
        }
    }

    pub async fn handle(&self, query: ListArticlesQuery) -> Result<ListArticlesResult, ContentError> {
        let category_id = match query.category_slug.as_deref() {
            Some(slug) => Some(
                self.categories
                    .find_by_slug(slug)
                    .await?
                    .ok_or_else(|| ContentError::not_found("category", slug))?
                    .id,
            ),
            None => None,
        };

        let posts = self
            .posts
            .list_published(PublishedPostQuery {
                now: self.clock.now(),
                category_id,
                ordering: query.ordering,
                limit: query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
            })
            .await?;
        Ok(posts)
    }
}
