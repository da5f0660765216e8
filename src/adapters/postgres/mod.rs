//! PostgreSQL adapters - sqlx implementations of the repository ports.
//!
//! - `PostgresMembershipRepository` - memberships with the stale-event guard
//!   enforced in SQL
//! - `PostgresPostRepository` / `PostgresCategoryRepository` - content
//! - `PostgresAdRepository` - ad inventory
//! - `PostgresNewsletterRepository` - newsletter subscribers

mod ad_repository;
mod category_repository;
mod membership_repository;
mod newsletter_repository;
mod post_repository;

pub use ad_repository::PostgresAdRepository;
pub use category_repository::PostgresCategoryRepository;
pub use membership_repository::PostgresMembershipRepository;
pub use newsletter_repository::PostgresNewsletterRepository;
pub use post_repository::PostgresPostRepository;

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Opens the connection pool described by `config`.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect(&config.url)
        .await
        .map_err(|e| db_error("connect", e))
}

/// Applies the embedded migrations in `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to run migrations: {}", e)))
}

pub(crate) fn db_error(operation: &str, e: sqlx::Error) -> DomainError {
    DomainError::database(format!("Failed to {}: {}", operation, e))
}

/// Maps a unique violation to `AlreadyExists`, anything else to a database error.
pub(crate) fn write_error(operation: &str, entity: &str, e: sqlx::Error) -> DomainError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => DomainError::new(
            ErrorCode::AlreadyExists,
            format!("{} already exists", entity),
        ),
        _ => db_error(operation, e),
    }
}

pub(crate) fn corrupt(field: &str, value: impl std::fmt::Display) -> DomainError {
    DomainError::database(format!("Invalid {} value in database: {}", field, value))
}
