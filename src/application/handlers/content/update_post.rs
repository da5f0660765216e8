//! UpdatePostHandler - editors change a post's editable fields.

use std::sync::Arc;

use tracing::info;

use crate::application::authorization::ensure_can_edit;
use crate::domain::content::{ContentError, Post, PostDraft};
use crate::domain::foundation::{Actor, Clock, PostId};
use crate::ports::{CategoryRepository, PostRepository};

use super::create_post::ensure_category_exists;

#[derive(Debug, Clone)]
pub struct UpdatePostCommand {
    pub actor: Actor,
    pub post_id: PostId,
    pub draft: PostDraft,
}

pub type UpdatePostResult = Post;

pub struct UpdatePostHandler {
    posts: Arc<dyn PostRepository>,
    categories: Arc<dyn CategoryRepository>,
    clock: Arc<dyn Clock>,
}

impl UpdatePostHandler {
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

    pub async fn handle(&self, cmd: UpdatePostCommand) -> Result<UpdatePostResult, ContentError> {
        ensure_can_edit(&cmd.actor, "update posts")?;

        let mut post = self
            .posts
            .find_by_id(&cmd.post_id)
            .await?
            .ok_or_else(|| ContentError::not_found("post", cmd.post_id))?;

        if post.category_id != cmd.draft.category_id {
            ensure_category_exists(self.categories.as_ref(), &cmd.draft).await?;
        }

        post.apply(cmd.draft, self.clock.now())?;
        self.posts.update(&post).await?;

        info!(post_id = %post.id, status = %post.status, "Post updated");
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryCategoryRepository, InMemoryPostRepository};
    use crate::domain::content::PostStatus;
    use crate::domain::foundation::{CategoryId, FixedClock, Timestamp, UserId, UserRole};

    fn now() -> Timestamp {
        Timestamp::from_unix_secs(1_720_000_000).unwrap()
    }

    fn draft(title: &str, status: PostStatus) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            summary: None,
            external_url: None,
            image_url: None,
            label: None,
            category_id: CategoryId::from_uuid(uuid::Uuid::nil()),
            is_premium: false,
            is_featured: false,
            status,
            publish_at: None,
        }
    }

    async fn setup() -> (UpdatePostHandler, InMemoryPostRepository, Post) {
        let posts = InMemoryPostRepository::new();
        let post = Post::create(
            draft("Original", PostStatus::Draft),
            "original".to_string(),
            UserId::new("editor-1").unwrap(),
            now().minus_days(1),
        )
        .unwrap();
        posts.create(&post).await.unwrap();
        let handler = UpdatePostHandler::new(
            Arc::new(posts.clone()),
            Arc::new(InMemoryCategoryRepository::new()),
            Arc::new(FixedClock::new(now())),
        );
        (handler, posts, post)
    }

    fn editor() -> Actor {
        Actor::new(UserId::new("editor-2").unwrap(), None, UserRole::Editor)
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_slug() {
        let (handler, posts, post) = setup().await;
        let updated = handler
            .handle(UpdatePostCommand {
                actor: editor(),
                post_id: post.id,
                draft: draft("Rewritten headline", PostStatus::Published),
            })
            .await
            .unwrap();

        assert_eq!(updated.title, "Rewritten headline");
        assert_eq!(updated.slug, "original");
        assert_eq!(updated.publish_at, Some(now()));
        assert_eq!(updated.updated_at, now());
        let stored = posts.find_by_id(&post.id).await.unwrap().unwrap();
        assert_eq!(stored.status, PostStatus::Published);
    }

    #[tokio::test]
    async fn missing_post_is_not_found() {
        let (handler, _, _) = setup().await;
        let err = handler
            .handle(UpdatePostCommand {
                actor: editor(),
                post_id: PostId::new(),
                draft: draft("x", PostStatus::Draft),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::NotFound { .. }));
    }

    #[tokio::test]
    async fn moving_to_unknown_category_is_rejected() {
        let (handler, _, post) = setup().await;
        let mut moved = draft("x", PostStatus::Draft);
        moved.category_id = CategoryId::new();
        let err = handler
            .handle(UpdatePostCommand {
                actor: editor(),
                post_id: post.id,
                draft: moved,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::ValidationFailed { .. }));
    }

    #[tokio::test]
    async fn readers_cannot_update() {
        let (handler, _, post) = setup().await;
        let err = handler
            .handle(UpdatePostCommand {
                actor: Actor::new(UserId::new("r").unwrap(), None, UserRole::Reader),
                post_id: post.id,
                draft: draft("x", PostStatus::Draft),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::Forbidden { .. }));
    }
}
