//! GetArticleHandler - loads a visible post by slug and runs the paywall.

use std::sync::Arc;

use tracing::warn;

use crate::domain::content::{ContentError, Post};
use crate::domain::foundation::{Clock, UserId};
use crate::domain::membership::MembershipInfo;
use crate::domain::paywall::{AccessDecision, PaywallPolicy, PostAccessProfile};
use crate::ports::{MembershipRepository, PostRepository};

#[derive(Debug, Clone)]
pub struct GetArticleQuery {
    pub slug: String,
    /// Signed-in reader, if any.
    pub viewer: Option<UserId>,
}

/// The post as the reader may see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetArticleResult {
    /// `external_url` is `None` when access was denied.
    pub post: Post,
    pub access: AccessDecision,
    pub membership: MembershipInfo,
}

pub struct GetArticleHandler {
    posts: Arc<dyn PostRepository>,
    memberships: Arc<dyn MembershipRepository>,
    clock: Arc<dyn Clock>,
    policy: PaywallPolicy,
}

impl GetArticleHandler {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        memberships: Arc<dyn MembershipRepository>,
        clock: Arc<dyn Clock>,
        policy: PaywallPolicy,
    ) -> Self {
        Self {
            posts,
            memberships,
            clock,
            policy,
        }
    }

    pub async fn handle(&self, query: GetArticleQuery) -> Result<GetArticleResult, ContentError> {
        let now = self.clock.now();

        let mut post = self
            .posts
            .find_by_slug(&query.slug)
            .await?
            .filter(|p| p.is_publicly_visible(&now))
            .ok_or_else(|| ContentError::not_found("post", &query.slug))?;

        let membership = match &query.viewer {
            Some(user_id) => {
                let stored = self.memberships.find_by_user_id(user_id).await?;
                MembershipInfo::resolve(stored.as_ref(), &now)
            }
            None => MembershipInfo::free(),
        };

        let access = self
            .policy
            .decide(PostAccessProfile::from(&post), &membership, &now);
        if !access.can_access {
            post.external_url = None;
        }

        if let Err(err) = self.posts.increment_views(&post.id).await {
            warn!(post_id = %post.id, error = %err, "Failed to count article view");
        } else {
            post.views += 1;
        }

        Ok(GetArticleResult {
            post,
            access,
            membership,
        })
    }
}
