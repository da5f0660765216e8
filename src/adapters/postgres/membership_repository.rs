//! PostgreSQL implementation of MembershipRepository.
//!
//! The stale-event guard lives in the `WHERE` clauses: a write only lands
//! when the stored `last_event_at` is absent or not newer than the incoming
//! one, so concurrent webhook deliveries cannot regress a record. A plain
//! update never moves a stored CANCELLED record out of CANCELLED; only the
//! checkout upsert does.

use crate::domain::foundation::{DomainError, MembershipId, Timestamp, UserId};
use crate::domain::membership::{Membership, MembershipStatus};
use crate::ports::MembershipRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{corrupt, db_error};

/// PostgreSQL implementation of the MembershipRepository port.
pub struct PostgresMembershipRepository {
    pool: PgPool,
}

impl PostgresMembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a membership.
#[derive(Debug, sqlx::FromRow)]
struct MembershipRow {
    id: Uuid,
    user_id: String,
    status: String,
    stripe_customer_id: Option<String>,
    stripe_subscription_id: Option<String>,
    current_period_end: Option<DateTime<Utc>>,
    last_event_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MembershipRow> for Membership {
    type Error = DomainError;

    fn try_from(row: MembershipRow) -> Result<Self, Self::Error> {
        let status: MembershipStatus = row
            .status
            .parse()
            .map_err(|_| corrupt("membership status", &row.status))?;

        Ok(Membership {
            id: MembershipId::from_uuid(row.id),
            user_id: UserId::new(row.user_id).map_err(|e| corrupt("user_id", e))?,
            status,
            stripe_customer_id: row.stripe_customer_id,
            stripe_subscription_id: row.stripe_subscription_id,
            current_period_end: row.current_period_end.map(Timestamp::from_datetime),
            last_event_at: row.last_event_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, user_id, status, stripe_customer_id, stripe_subscription_id,
           current_period_end, last_event_at, created_at, updated_at
    FROM memberships
"#;

#[async_trait]
impl MembershipRepository for PostgresMembershipRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Membership>, DomainError> {
        let row: Option<MembershipRow> =
            sqlx::query_as(&format!("{} WHERE user_id = $1", SELECT_COLUMNS))
                .bind(user_id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("find membership", e))?;

        row.map(Membership::try_from).transpose()
    }

    async fn find_by_customer_id(
        &self,
        customer_id: &str,
    ) -> Result<Option<Membership>, DomainError> {
        // A customer id belongs to one user; the newest record wins if a
        // manual fix ever left two behind.
        let row: Option<MembershipRow> = sqlx::query_as(&format!(
            "{} WHERE stripe_customer_id = $1 ORDER BY updated_at DESC LIMIT 1",
            SELECT_COLUMNS
        ))
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find membership", e))?;

        row.map(Membership::try_from).transpose()
    }

    async fn count_by_status(&self, status: MembershipStatus) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM memberships WHERE status = $1")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("count memberships", e))?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn upsert_by_user_id(&self, membership: &Membership) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO memberships (
                id, user_id, status, stripe_customer_id, stripe_subscription_id,
                current_period_end, last_event_at, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (user_id) DO UPDATE SET
                status = EXCLUDED.status,
                stripe_customer_id = EXCLUDED.stripe_customer_id,
                stripe_subscription_id = EXCLUDED.stripe_subscription_id,
                current_period_end = EXCLUDED.current_period_end,
                last_event_at = EXCLUDED.last_event_at,
                updated_at = EXCLUDED.updated_at
            WHERE memberships.last_event_at IS NULL
               OR EXCLUDED.last_event_at IS NULL
               OR memberships.last_event_at <= EXCLUDED.last_event_at
            "#,
        )
        .bind(membership.id.as_uuid())
        .bind(membership.user_id.as_str())
        .bind(membership.status.as_str())
        .bind(&membership.stripe_customer_id)
        .bind(&membership.stripe_subscription_id)
        .bind(membership.current_period_end.map(|t| *t.as_datetime()))
        .bind(membership.last_event_at.map(|t| *t.as_datetime()))
        .bind(membership.created_at.as_datetime())
        .bind(membership.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("upsert membership", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn update(&self, membership: &Membership) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE memberships SET
                status = $2,
                stripe_customer_id = $3,
                stripe_subscription_id = $4,
                current_period_end = $5,
                last_event_at = $6,
                updated_at = $7
            WHERE id = $1
              AND (last_event_at IS NULL OR $6 IS NULL OR last_event_at <= $6)
              AND NOT (status = 'CANCELLED' AND $2 <> 'CANCELLED')
            "#,
        )
        .bind(membership.id.as_uuid())
        .bind(membership.status.as_str())
        .bind(&membership.stripe_customer_id)
        .bind(&membership.stripe_subscription_id)
        .bind(membership.current_period_end.map(|t| *t.as_datetime()))
        .bind(membership.last_event_at.map(|t| *t.as_datetime()))
        .bind(membership.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update membership", e))?;

        Ok(result.rows_affected() > 0)
    }
}
