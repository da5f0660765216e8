//! CreatePostHandler - editors add a post.

use std::sync::Arc;

use tracing::info;

use crate::application::authorization::ensure_can_edit;
use crate::domain::content::{ContentError, Post, PostDraft};
use crate::domain::foundation::{slugify, Actor, Clock};
use crate::ports::{CategoryRepository, PostRepository};

#[derive(Debug, Clone)]
pub struct CreatePostCommand {
    pub actor: Actor,
    pub draft: PostDraft,
    /// Derived from the title when absent.
    pub slug: Option<String>,
}

pub type CreatePostResult = Post;

pub struct CreatePostHandler {
    posts: Arc<dyn PostRepository>,
    categories: Arc<dyn CategoryRepository>,
    clock: Arc<dyn Clock>,
}

impl CreatePostHandler {
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

    pub async fn handle(&self, cmd: CreatePostCommand) -> Result<CreatePostResult, ContentError> {
        ensure_can_edit(&cmd.actor, "create posts")?;
        cmd.draft.validate()?;
        ensure_category_exists(self.categories.as_ref(), &cmd.draft).await?;

        let now = self.clock.now();
        let base = slugify(cmd.slug.as_deref().unwrap_or(&cmd.draft.title));
        if base.is_empty() {
            return Err(ContentError::validation(
                "slug",
                "must contain letters or digits",
            ));
        }
        let slug = if self.posts.slug_exists(&base).await? {
            format!("{}-{}", base, now.as_unix_millis())
        } else {
            base
        };

        let post = Post::create(cmd.draft, slug, cmd.actor.user_id.clone(), now)?;
        self.posts.create(&post).await?;

        info!(post_id = %post.id, slug = %post.slug, author = %post.author_id, "Post created");
        Ok(post)
    }
}

pub(super) async fn ensure_category_exists(
    categories: &dyn CategoryRepository,
    draft: &PostDraft,
) -> Result<(), ContentError> {
    match categories.find_by_id(&draft.category_id).await? {
        Some(_) => Ok(()),
        None => Err(ContentError::validation("category_id", "unknown category")),
    }
}
