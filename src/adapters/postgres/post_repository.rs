//! PostgreSQL implementation of PostRepository.

use crate::domain::content::{Post, PostStatus};
use crate::domain::foundation::{
    CategoryId, DomainError, ErrorCode, PostId, Timestamp, UserId,
};
use crate::ports::{PostCounts, PostOrdering, PostRepository, PublishedPostQuery};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{corrupt, db_error, write_error};

pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    title: String,
    slug: String,
    summary: Option<String>,
    external_url: Option<String>,
    image_url: Option<String>,
    label: Option<String>,
    category_id: Uuid,
    author_id: String,
    is_premium: bool,
    is_featured: bool,
    status: String,
    publish_at: Option<DateTime<Utc>>,
    views: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for Post {
    type Error = DomainError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        let status: PostStatus = row
            .status
            .parse()
            .map_err(|_| corrupt("post status", &row.status))?;

        Ok(Post {
            id: PostId::from_uuid(row.id),
            title: row.title,
            slug: row.slug,
            summary: row.summary,
            external_url: row.external_url,
            image_url: row.image_url,
            label: row.label,
            category_id: CategoryId::from_uuid(row.category_id),
            author_id: UserId::new(row.author_id).map_err(|e| corrupt("author_id", e))?,
            is_premium: row.is_premium,
            is_featured: row.is_featured,
            status,
            publish_at: row.publish_at.map(Timestamp::from_datetime),
            views: row.views,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, title, slug, summary, external_url, image_url, label, category_id,
           author_id, is_premium, is_featured, status, publish_at, views,
           created_at, updated_at
    FROM posts
"#;

fn into_posts(rows: Vec<PostRow>) -> Result<Vec<Post>, DomainError> {
    rows.into_iter().map(Post::try_from).collect()
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, DomainError> {
        let row: Option<PostRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("find post", e))?;

        row.map(Post::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, DomainError> {
        let row: Option<PostRow> = sqlx::query_as(&format!("{} WHERE slug = $1", SELECT_COLUMNS))
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("find post", e))?;

        row.map(Post::try_from).transpose()
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, DomainError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM posts WHERE slug = $1)")
            .bind(slug)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("check post slug", e))?;
        Ok(exists)
    }

    async fn list_all(&self) -> Result<Vec<Post>, DomainError> {
        let rows: Vec<PostRow> =
            sqlx::query_as(&format!("{} ORDER BY created_at DESC", SELECT_COLUMNS))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| db_error("list posts", e))?;

        into_posts(rows)
    }

    async fn list_published(&self, query: PublishedPostQuery) -> Result<Vec<Post>, DomainError> {
        let order = match query.ordering {
            PostOrdering::Latest => "publish_at DESC NULLS LAST, created_at DESC",
            PostOrdering::Trending => "views DESC, publish_at DESC NULLS LAST",
        };
        let sql = format!(
            r#"{}
            WHERE status = 'PUBLISHED'
              AND (publish_at IS NULL OR publish_at <= $1)
              AND ($2::uuid IS NULL OR category_id = $2)
            ORDER BY {}
            LIMIT $3"#,
            SELECT_COLUMNS, order
        );

        let rows: Vec<PostRow> = sqlx::query_as(&sql)
            .bind(query.now.as_datetime())
            .bind(query.category_id.map(|id| *id.as_uuid()))
            .bind(i64::from(query.limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list published posts", e))?;

        into_posts(rows)
    }

    async fn count_by_category(&self, category_id: &CategoryId) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE category_id = $1")
            .bind(category_id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("count posts", e))?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn counts(
        &self,
        day_start: &Timestamp,
        now: &Timestamp,
    ) -> Result<PostCounts, DomainError> {
        let (total, published_today, scheduled_upcoming): (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*),
                COUNT(*) FILTER (WHERE status = 'PUBLISHED' AND publish_at >= $1),
                COUNT(*) FILTER (WHERE status = 'SCHEDULED' AND publish_at > $2)
            FROM posts
            "#,
        )
        .bind(day_start.as_datetime())
        .bind(now.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("count posts", e))?;

        Ok(PostCounts {
            total: u64::try_from(total).unwrap_or_default(),
            published_today: u64::try_from(published_today).unwrap_or_default(),
            scheduled_upcoming: u64::try_from(scheduled_upcoming).unwrap_or_default(),
        })
    }

    async fn list_recent_editorial(&self, limit: u32) -> Result<Vec<Post>, DomainError> {
        let rows: Vec<PostRow> = sqlx::query_as(&format!(
            "{} WHERE status IN ('PUBLISHED', 'SCHEDULED') ORDER BY created_at DESC LIMIT $1",
            SELECT_COLUMNS
        ))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list recent posts", e))?;

        into_posts(rows)
    }

    async fn create(&self, post: &Post) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO posts (
                id, title, slug, summary, external_url, image_url, label, category_id,
                author_id, is_premium, is_featured, status, publish_at, views,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(post.id.as_uuid())
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.summary)
        .bind(&post.external_url)
        .bind(&post.image_url)
        .bind(&post.label)
        .bind(post.category_id.as_uuid())
        .bind(post.author_id.as_str())
        .bind(post.is_premium)
        .bind(post.is_featured)
        .bind(post.status.as_str())
        .bind(post.publish_at.map(|t| *t.as_datetime()))
        .bind(post.views)
        .bind(post.created_at.as_datetime())
        .bind(post.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("create post", "Post slug", e))?;

        Ok(())
    }

    async fn update(&self, post: &Post) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE posts SET
                title = $2,
                slug = $3,
                summary = $4,
                external_url = $5,
                image_url = $6,
                label = $7,
                category_id = $8,
                is_premium = $9,
                is_featured = $10,
                status = $11,
                publish_at = $12,
                updated_at = $13
            WHERE id = $1
            "#,
        )
        .bind(post.id.as_uuid())
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.summary)
        .bind(&post.external_url)
        .bind(&post.image_url)
        .bind(&post.label)
        .bind(post.category_id.as_uuid())
        .bind(post.is_premium)
        .bind(post.is_featured)
        .bind(post.status.as_str())
        .bind(post.publish_at.map(|t| *t.as_datetime()))
        .bind(post.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("update post", "Post slug", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::PostNotFound, "Post not found"));
        }
        Ok(())
    }

    async fn delete(&self, id: &PostId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete post", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn increment_views(&self, id: &PostId) -> Result<(), DomainError> {
        sqlx::query("UPDATE posts SET views = views + 1 WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("increment views", e))?;
        Ok(())
    }
}
