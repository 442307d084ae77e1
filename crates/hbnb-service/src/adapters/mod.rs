//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod memory;
pub mod security;
pub mod sqlite;

use std::sync::Arc;

use sqlx::SqlitePool;

use hbnb::{Amenity, Place, Repository, Review, User};

// Re-exports
pub use memory::InMemoryRepository;
pub use security::{HmacTokenIssuer, Pbkdf2Hasher, TokenError};
pub use sqlite::{
    SqliteAmenityRepository, SqlitePlaceRepository, SqliteReviewRepository, SqliteUserRepository,
};

/// One repository per entity type, all backed by the same storage variant
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn Repository<User>>,
    pub places: Arc<dyn Repository<Place>>,
    pub amenities: Arc<dyn Repository<Amenity>>,
    pub reviews: Arc<dyn Repository<Review>>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryRepository::<User>::new()),
            places: Arc::new(InMemoryRepository::<Place>::new()),
            amenities: Arc::new(InMemoryRepository::<Amenity>::new()),
            reviews: Arc::new(InMemoryRepository::<Review>::new()),
        }
    }

    /// Expects a pool whose schema is already migrated (see [`sqlite::open`])
    pub fn sqlite(pool: SqlitePool) -> Self {
        Self {
            users: Arc::new(SqliteUserRepository::new(pool.clone())),
            places: Arc::new(SqlitePlaceRepository::new(pool.clone())),
            amenities: Arc::new(SqliteAmenityRepository::new(pool.clone())),
            reviews: Arc::new(SqliteReviewRepository::new(pool)),
        }
    }
}
