//! GetDashboardStatsHandler - headline numbers for the back-office home.
//!
//! "Today" starts at midnight UTC of the injected clock's date.

use std::sync::Arc;

use crate::application::authorization::ensure_can_edit;
use crate::domain::content::{ContentError, Post};
use crate::domain::foundation::{Actor, Clock};
use crate::domain::membership::MembershipStatus;
use crate::ports::{MembershipRepository, NewsletterRepository, PostRepository};

pub const RECENT_POSTS_LIMIT: u32 = 10;

#[derive(Debug, Clone)]
pub struct GetDashboardStatsQuery {
    pub actor: Actor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_posts: u64,
    pub published_today: u64,
    pub scheduled_posts: u64,
    pub total_subscribers: u64,
    /// Memberships currently ACTIVE.
    pub premium_members: u64,
    /// Published and scheduled posts, newest created first.
    pub recent_posts: Vec<Post>,
}

pub type GetDashboardStatsResult = DashboardStats;

pub struct GetDashboardStatsHandler {
    posts: Arc<dyn PostRepository>,
    subscribers: Arc<dyn NewsletterRepository>,
    memberships: Arc<dyn MembershipRepository>,
    clock: Arc<dyn Clock>,
}

impl GetDashboardStatsHandler {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        subscribers: Arc<dyn NewsletterRepository>,
        memberships: Arc<dyn MembershipRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            posts,
            subscribers,
            memberships,
            clock,
        }
    }

    pub async fn handle(
        &self,
        query: GetDashboardStatsQuery,
    ) -> Result<GetDashboardStatsResult, ContentError> {
        ensure_can_edit(&query.actor, "view dashboard")?;

        let now = self.clock.now();
        let day_start = now.start_of_day();

        let (post_counts, recent_posts, total_subscribers, premium_members) = tokio::try_join!(
            self.posts.counts(&day_start, &now),
            self.posts.list_recent_editorial(RECENT_POSTS_LIMIT),
            self.subscribers.count(),
            self.memberships.count_by_status(MembershipStatus::Active),
        )?;

        Ok(DashboardStats {
            total_posts: post_counts.total,
            published_today: post_counts.published_today,
            scheduled_posts: post_counts.scheduled_upcoming,
            total_subscribers,
            premium_members,
            recent_posts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryMembershipRepository, InMemoryNewsletterRepository, InMemoryPostRepository,
    };
    use crate::domain::content::{EmailAddress, NewsletterSubscriber, PostStatus};
    use crate::domain::foundation::{CategoryId, FixedClock, PostId, Timestamp, UserId, UserRole};
    use crate::domain::membership::Membership;

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn now() -> Timestamp {
        Timestamp::from_unix_secs(1_720_604_800).unwrap()
    }

    fn post(
        slug: &str,
        status: PostStatus,
        publish_at: Option<Timestamp>,
        created_secs: i64,
    ) -> Post {
        let created = now().plus_secs(created_secs);
        Post {
            id: PostId::new(),
            title: slug.to_string(),
            slug: slug.to_string(),
            summary: None,
            external_url: None,
            image_url: None,
            label: None,
            category_id: CategoryId::new(),
            author_id: UserId::new("editor-1").unwrap(),
            is_premium: false,
            is_featured: false,
            status,
            publish_at,
            views: 0,
            created_at: created,
            updated_at: created,
        }
    }

    fn staff(role: UserRole) -> Actor {
        Actor::new(UserId::new("staff-1").unwrap(), None, role)
    }

    struct Fixture {
        handler: GetDashboardStatsHandler,
        posts: InMemoryPostRepository,
        subscribers: InMemoryNewsletterRepository,
        memberships: InMemoryMembershipRepository,
    }

    fn fixture() -> Fixture {
        let posts = InMemoryPostRepository::new();
        let subscribers = InMemoryNewsletterRepository::new();
        let memberships = InMemoryMembershipRepository::new();
        let handler = GetDashboardStatsHandler::new(
            Arc::new(posts.clone()),
            Arc::new(subscribers.clone()),
            Arc::new(memberships.clone()),
            Arc::new(FixedClock::new(now())),
        );
        Fixture {
            handler,
            posts,
            subscribers,
            memberships,
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn counts_posts_subscribers_and_active_members() {
        let f = fixture();
        let today = now().start_of_day();

        for p in [
            post("this-morning", PostStatus::Published, Some(today.plus_secs(60)), -300),
            post("yesterday", PostStatus::Published, Some(today.plus_secs(-60)), -200),
            post("tomorrow", PostStatus::Scheduled, Some(now().add_days(1)), -100),
            post("overdue", PostStatus::Scheduled, Some(now().minus_days(1)), -50),
            post("draft", PostStatus::Draft, None, -10),
        ] {
            f.posts.create(&p).await.unwrap();
        }

        f.subscribers
            .create(&NewsletterSubscriber::new(
                EmailAddress::parse("a@example.com").unwrap(),
                now(),
            ))
            .await
            .unwrap();

        let mut cancelled = Membership::from_checkout(
            UserId::new("u2").unwrap(),
            None,
            None,
            None,
            now(),
            now(),
        );
        cancelled.status = MembershipStatus::Cancelled;
        f.memberships.insert(cancelled).await;
        f.memberships
            .insert(Membership::from_checkout(
                UserId::new("u1").unwrap(),
                None,
                None,
                None,
                now(),
                now(),
            ))
            .await;

        let stats = f
            .handler
            .handle(GetDashboardStatsQuery {
                actor: staff(UserRole::Editor),
            })
            .await
            .unwrap();

        assert_eq!(stats.total_posts, 5);
        assert_eq!(stats.published_today, 1);
        assert_eq!(stats.scheduled_posts, 1);
        assert_eq!(stats.total_subscribers, 1);
        assert_eq!(stats.premium_members, 1);

        let recent: Vec<&str> = stats.recent_posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(recent, vec!["overdue", "tomorrow", "yesterday", "this-morning"]);
    }

    #[tokio::test]
    async fn recent_posts_are_capped() {
        let f = fixture();
        for i in 0..(RECENT_POSTS_LIMIT as i64 + 3) {
            f.posts
                .create(&post(&format!("post-{i}"), PostStatus::Published, Some(now()), i))
                .await
                .unwrap();
        }

        let stats = f
            .handler
            .handle(GetDashboardStatsQuery {
                actor: staff(UserRole::Admin),
            })
            .await
            .unwrap();

        assert_eq!(stats.recent_posts.len(), RECENT_POSTS_LIMIT as usize);
        assert_eq!(stats.recent_posts[0].slug, "post-12");
    }

    #[tokio::test]
    async fn readers_are_forbidden() {
        let err = fixture()
            .handler
            .handle(GetDashboardStatsQuery {
                actor: staff(UserRole::Reader),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::Forbidden { .. }));
    }
}
