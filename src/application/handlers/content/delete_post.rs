//! DeletePostHandler - admins remove a post.

use std::sync::Arc;

use tracing::info;

use crate::application::authorization::ensure_admin;
use crate::domain::content::ContentError;
use crate::domain::foundation::{Actor, PostId};
use crate::ports::PostRepository;

#[derive(Debug, Clone)]
pub struct DeletePostCommand {
    pub actor: Actor,
    pub post_id: PostId,
}

pub struct DeletePostHandler {
    posts: Arc<dyn PostRepository>,
}

impl DeletePostHandler {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    pub async fn handle(&self, cmd: DeletePostCommand) -> Result<(), ContentError> {
        ensure_admin(&cmd.actor, "delete posts")?;

        if !self.posts.delete(&cmd.post_id).await? {
            return Err(ContentError::not_found("post", cmd.post_id));
        }
        info!(post_id = %cmd.post_id, by = %cmd.actor.user_id, "Post deleted");
        Ok(())
    }
}
