//! Repository Port
//!
//! Storage-agnostic interface shared by every entity type. The in-memory and
//! SQL-backed implementations honour the same contract, so callers can swap
//! one for the other without a change in behaviour:
//!
//! - `get` / `update` return `Ok(None)` for an unknown id, never an error
//! - `delete` reports whether anything was removed
//! - `get_all` and the attribute queries order by `created_at`, then `id`
//! - attribute names are limited to `Entity::ATTRIBUTES`; anything else is a
//!   validation error

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{errors::DomainError, Entity};

/// Repository interface for any entity type
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Store a new entity
    async fn add(&self, entity: E) -> Result<E, DomainError>;

    /// Find an entity by ID
    async fn get(&self, id: Uuid) -> Result<Option<E>, DomainError>;

    /// Find all entities
    async fn get_all(&self) -> Result<Vec<E>, DomainError>;

    /// Apply a partial update and persist it
    async fn update(&self, id: Uuid, patch: E::Patch) -> Result<Option<E>, DomainError>;

    /// Delete an entity by ID
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Find every entity whose attribute equals `value`
    async fn filter_by_attribute(&self, name: &str, value: &Value)
        -> Result<Vec<E>, DomainError>;

    /// Find the first entity whose attribute equals `value`
    async fn get_by_attribute(&self, name: &str, value: &Value) -> Result<Option<E>, DomainError> {
        Ok(self.filter_by_attribute(name, value).await?.into_iter().next())
    }
}

/// Reject attribute names the entity does not expose and values that are
/// not scalars (arrays, objects)
pub fn validate_attribute_query<E: Entity>(name: &str, value: &Value) -> Result<(), DomainError> {
    if !E::ATTRIBUTES.contains(&name) {
        return Err(DomainError::validation(format!(
            "{} has no attribute '{}'",
            E::KIND,
            name
        )));
    }
    if value.is_array() || value.is_object() {
        return Err(DomainError::validation(format!(
            "Unsupported value for attribute '{}'",
            name
        )));
    }
    Ok(())
}

/// Attribute equality as the storage engines see it: numbers compare by
/// numeric value, everything else structurally.
pub fn attribute_matches(stored: &Value, wanted: &Value) -> bool {
    match (stored, wanted) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        _ => stored == wanted,
    }
}
