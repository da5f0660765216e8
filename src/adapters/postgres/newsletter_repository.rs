//! PostgreSQL implementation of NewsletterRepository.

use crate::domain::content::{EmailAddress, NewsletterSubscriber};
use crate::domain::foundation::{DomainError, SubscriberId, Timestamp};
use crate::ports::NewsletterRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{corrupt, db_error, write_error};

pub struct PostgresNewsletterRepository {
    pool: PgPool,
}

impl PostgresNewsletterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SubscriberRow {
    id: Uuid,
    email: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<SubscriberRow> for NewsletterSubscriber {
    type Error = DomainError;

    fn try_from(row: SubscriberRow) -> Result<Self, Self::Error> {
        Ok(NewsletterSubscriber {
            id: SubscriberId::from_uuid(row.id),
            email: EmailAddress::parse(&row.email).map_err(|_| corrupt("email", &row.email))?,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl NewsletterRepository for PostgresNewsletterRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<NewsletterSubscriber>, DomainError> {
        let row: Option<SubscriberRow> = sqlx::query_as(
            "SELECT id, email, created_at FROM newsletter_subscribers WHERE email = $1",
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find subscriber", e))?;

        row.map(NewsletterSubscriber::try_from).transpose()
    }

    async fn list_newest_first(&self) -> Result<Vec<NewsletterSubscriber>, DomainError> {
        let rows: Vec<SubscriberRow> = sqlx::query_as(
            "SELECT id, email, created_at FROM newsletter_subscribers ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list subscribers", e))?;

        rows.into_iter().map(NewsletterSubscriber::try_from).collect()
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM newsletter_subscribers")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("count subscribers", e))?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn create(&self, subscriber: &NewsletterSubscriber) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO newsletter_subscribers (id, email, created_at) VALUES ($1, $2, $3)",
        )
        .bind(subscriber.id.as_uuid())
        .bind(subscriber.email.as_str())
        .bind(subscriber.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("create subscriber", "Subscriber", e))?;
        Ok(())
    }
}
