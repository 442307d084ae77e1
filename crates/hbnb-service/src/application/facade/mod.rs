//! HBnB Facade
//!
//! Single entry point for callers. Enforces the rules that span entities
//! (reference resolution, email uniqueness, ownership on delete) before
//! delegating to the repositories.
//!
//! Ids are taken as strings. One that does not parse behaves like an
//! unknown id: lookups return `None`, deletes return `false`, and creates
//! or updates report a dangling reference.
//!
//! Every mutation runs under one async mutex so check-then-write sequences
//! cannot interleave. Reads take no lock.

mod amenities;
mod auth;
mod places;
mod reviews;
mod users;

use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use hbnb::{Amenity, DomainError, Entity, PasswordHasher, Place, Repository, Review, TokenIssuer, User};

use crate::adapters::Repositories;

pub struct Facade {
    users: Arc<dyn Repository<User>>,
    places: Arc<dyn Repository<Place>>,
    amenities: Arc<dyn Repository<Amenity>>,
    reviews: Arc<dyn Repository<Review>>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
    writes: Mutex<()>,
}

impl Facade {
    pub fn new(
        repositories: Repositories,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users: repositories.users,
            places: repositories.places,
            amenities: repositories.amenities,
            reviews: repositories.reviews,
            hasher,
            tokens,
            writes: Mutex::new(()),
        }
    }
}

fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

/// Look up a referenced entity, failing with "<label> with ID <raw> does not exist"
async fn resolve<E: Entity>(
    repo: &dyn Repository<E>,
    label: &str,
    raw: &str,
) -> Result<E, DomainError> {
    let found = match parse_id(raw) {
        Some(id) => repo.get(id).await?,
        None => None,
    };
    found.ok_or_else(|| DomainError::missing_reference(label, raw))
}
