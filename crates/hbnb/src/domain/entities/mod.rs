//! Domain Entities
//!
//! Self-validating domain models without infrastructure dependencies.
//! - User: account that owns places and writes reviews
//! - Place: rental listing owned by a user
//! - Amenity: feature a place can offer
//! - Review: a user's rating of a place
//!
//! Fields are private. Every mutation goes through `Entity::apply`, which
//! validates a copy and only commits it when the whole patch is valid.

mod amenity;
mod place;
mod review;
mod user;

pub use amenity::*;
pub use place::*;
pub use review::*;
pub use user::*;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::errors::DomainError;

/// Behaviour shared by every stored entity
pub trait Entity: Clone + Serialize + Send + Sync + 'static {
    /// Partial update understood by `apply`
    type Patch: Send + 'static;

    /// Human-readable entity name used in messages ("User", "Place", ...)
    const KIND: &'static str;

    /// Scalar fields usable with attribute lookups
    const ATTRIBUTES: &'static [&'static str];

    fn id(&self) -> Uuid;

    fn created_at(&self) -> DateTime<Utc>;

    fn updated_at(&self) -> DateTime<Utc>;

    /// Validate and apply a partial update, refreshing `updated_at`.
    ///
    /// Leaves `self` untouched when any field is rejected.
    fn apply(&mut self, patch: Self::Patch) -> Result<(), DomainError>;

    /// Flat field-name → value mapping; references are flattened to ids
    fn to_record(&self) -> Map<String, Value> {
        // Entities derive Serialize over strings, numbers, ids and timestamps,
        // so this always yields an object
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            other => {
                debug_assert!(
                    false,
                    "{} did not serialize to an object: {:?}",
                    Self::KIND,
                    other
                );
                Map::new()
            }
        }
    }

    /// Current value of a scalar attribute, `None` for unknown names
    fn attribute(&self, name: &str) -> Option<Value> {
        if !Self::ATTRIBUTES.contains(&name) {
            return None;
        }
        self.to_record().remove(name)
    }
}
