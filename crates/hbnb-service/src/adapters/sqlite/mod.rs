//! SQLite Repository Implementations
//!
//! One table per entity plus `place_amenities`; the schema lives in
//! `migrations/` and is applied by [`open`].

mod amenity_repository;
mod attribute;
mod place_repository;
mod review_repository;
mod user_repository;

pub use amenity_repository::SqliteAmenityRepository;
pub use place_repository::SqlitePlaceRepository;
pub use review_repository::SqliteReviewRepository;
pub use user_repository::SqliteUserRepository;

use std::str::FromStr;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use uuid::Uuid;

use hbnb::DomainError;

pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Connect to `database_url` and bring the schema up to date.
///
/// Files are created on first use. An in-memory database lives inside a
/// single connection, so the pool is pinned to exactly one that never expires.
pub async fn open(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?
    };

    MIGRATOR.run(&pool).await?;
    tracing::debug!("SQLite schema ready at {}", database_url);

    Ok(pool)
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Ids are stored as hyphenated text
pub(crate) fn parse_uuid(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw)
        .map_err(|e| DomainError::Repository(format!("Corrupt id '{}': {}", raw, e)))
}
