//! PostgreSQL implementation of CategoryRepository.

use crate::domain::content::Category;
use crate::domain::foundation::{CategoryId, DomainError, ErrorCode, Timestamp};
use crate::ports::CategoryRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{db_error, write_error};

pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
    slug: String,
    sort_order: i32,
    created_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: CategoryId::from_uuid(row.id),
            name: row.name,
            slug: row.slug,
            sort_order: row.sort_order,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

const SELECT_COLUMNS: &str = "SELECT id, name, slug, sort_order, created_at FROM categories";

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, DomainError> {
        let rows: Vec<CategoryRow> =
            sqlx::query_as(&format!("{} ORDER BY sort_order ASC, name ASC", SELECT_COLUMNS))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| db_error("list categories", e))?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, DomainError> {
        let row: Option<CategoryRow> =
            sqlx::query_as(&format!("{} WHERE id = $1", SELECT_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("find category", e))?;

        Ok(row.map(Category::from))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, DomainError> {
        let row: Option<CategoryRow> =
            sqlx::query_as(&format!("{} WHERE slug = $1", SELECT_COLUMNS))
                .bind(slug)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("find category", e))?;

        Ok(row.map(Category::from))
    }

    async fn create(&self, category: &Category) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO categories (id, name, slug, sort_order, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(category.id.as_uuid())
        .bind(&category.name)
        .bind(&category.slug)
        .bind(category.sort_order)
        .bind(category.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("create category", "Category slug", e))?;

        Ok(())
    }

    async fn update(&self, category: &Category) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE categories SET name = $2, slug = $3, sort_order = $4 WHERE id = $1",
        )
        .bind(category.id.as_uuid())
        .bind(&category.name)
        .bind(&category.slug)
        .bind(category.sort_order)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("update category", "Category slug", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::CategoryNotFound,
                "Category not found",
            ));
        }
        Ok(())
    }

    async fn delete(&self, id: &CategoryId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete category", e))?;
        Ok(result.rows_affected() > 0)
    }
}
