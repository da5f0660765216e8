//! ListPostsHandler - every post, any status, for the editor dashboard.

use std::sync::Arc;

use crate::application::authorization::ensure_can_edit;
use crate::domain::content::{ContentError, Post};
use crate::domain::foundation::Actor;
use crate::ports::PostRepository;

#[derive(Debug, Clone)]
pub struct ListPostsQuery {
    pub actor: Actor,
}

pub type ListPostsResult = Vec<Post>;

pub struct ListPostsHandler {
    posts: Arc<dyn PostRepository>,
}

impl ListPostsHandler {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    pub async fn handle(&self, query: ListPostsQuery) -> Result<ListPostsResult, ContentError> {
        ensure_can_edit(&query.actor, "list posts")?;
        Ok(self.posts.list_all().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryPostRepository;
    use crate::domain::foundation::{UserId, UserRole};

    #[tokio::test]
    async fn readers_are_forbidden() {
        let handler = ListPostsHandler::new(Arc::new(InMemoryPostRepository::new()));
        let err = handler
            .handle(ListPostsQuery {
                actor: Actor::new(UserId::new("r").unwrap(), None, UserRole::Reader),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn editors_see_empty_list() {
        let handler = ListPostsHandler::new(Arc::new(InMemoryPostRepository::new()));
        let posts = handler
            .handle(ListPostsQuery {
                actor: Actor::new(UserId::new("e").unwrap(), None, UserRole::Editor),
            })
            .await
            .unwrap();
        assert!(posts.is_empty());
    }
}
