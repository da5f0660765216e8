//! PostgreSQL implementation of AdRepository.

use crate::domain::ads::{Ad, AdPosition};
use crate::domain::foundation::{AdId, DomainError, ErrorCode, Timestamp};
use crate::ports::AdRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{corrupt, db_error};

pub struct PostgresAdRepository {
    pool: PgPool,
}

impl PostgresAdRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AdRow {
    id: Uuid,
    title: String,
    image_url: Option<String>,
    link_url: String,
    position: String,
    active_from: Option<DateTime<Utc>>,
    active_to: Option<DateTime<Utc>>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AdRow> for Ad {
    type Error = DomainError;

    fn try_from(row: AdRow) -> Result<Self, Self::Error> {
        let position: AdPosition = row
            .position
            .parse()
            .map_err(|_| corrupt("ad position", &row.position))?;

        Ok(Ad {
            id: AdId::from_uuid(row.id),
            title: row.title,
            image_url: row.image_url,
            link_url: row.link_url,
            position,
            active_from: row.active_from.map(Timestamp::from_datetime),
            active_to: row.active_to.map(Timestamp::from_datetime),
            is_active: row.is_active,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, title, image_url, link_url, position, active_from, active_to,
           is_active, created_at, updated_at
    FROM ads
"#;

fn into_ads(rows: Vec<AdRow>) -> Result<Vec<Ad>, DomainError> {
    rows.into_iter().map(Ad::try_from).collect()
}

#[async_trait]
impl AdRepository for PostgresAdRepository {
    async fn list_all(&self) -> Result<Vec<Ad>, DomainError> {
        let rows: Vec<AdRow> = sqlx::query_as(&format!("{} ORDER BY created_at DESC", SELECT_COLUMNS))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list ads", e))?;
        into_ads(rows)
    }

    async fn list_by_position(&self, position: AdPosition) -> Result<Vec<Ad>, DomainError> {
        // Eligibility (active flag and window) is decided by the selector.
        let rows: Vec<AdRow> = sqlx::query_as(&format!(
            "{} WHERE position = $1 ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(position.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list ads", e))?;
        into_ads(rows)
    }

    async fn find_by_id(&self, id: &AdId) -> Result<Option<Ad>, DomainError> {
        let row: Option<AdRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("find ad", e))?;
        row.map(Ad::try_from).transpose()
    }

    async fn create(&self, ad: &Ad) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO ads (
                id, title, image_url, link_url, position, active_from, active_to,
                is_active, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(ad.id.as_uuid())
        .bind(&ad.title)
        .bind(&ad.image_url)
        .bind(&ad.link_url)
        .bind(ad.position.as_str())
        .bind(ad.active_from.map(|t| *t.as_datetime()))
        .bind(ad.active_to.map(|t| *t.as_datetime()))
        .bind(ad.is_active)
        .bind(ad.created_at.as_datetime())
        .bind(ad.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("create ad", e))?;
        Ok(())
    }

    async fn update(&self, ad: &Ad) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE ads SET
                title = $2,
                image_url = $3,
                link_url = $4,
                position = $5,
                active_from = $6,
                active_to = $7,
                is_active = $8,
                updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(ad.id.as_uuid())
        .bind(&ad.title)
        .bind(&ad.image_url)
        .bind(&ad.link_url)
        .bind(ad.position.as_str())
        .bind(ad.active_from.map(|t| *t.as_datetime()))
        .bind(ad.active_to.map(|t| *t.as_datetime()))
        .bind(ad.is_active)
        .bind(ad.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update ad", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::AdNotFound, "Ad not found"));
        }
        Ok(())
    }

    async fn delete(&self, id: &AdId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM ads WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete ad", e))?;
        Ok(result.rows_affected() > 0)
    }
}
