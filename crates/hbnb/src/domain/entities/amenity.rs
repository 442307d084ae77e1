//! Amenity - feature offered by places

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::Entity;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::require_text;

const NAME_MAX_CHARS: usize = 50;

#[derive(Debug, Clone, Serialize)]
pub struct Amenity {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct AmenityPatch {
    pub name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StoredAmenity {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Amenity {
    pub fn new(name: String) -> Result<Self, DomainError> {
        Self::validate_name(&name)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn restore(stored: StoredAmenity) -> Result<Self, DomainError> {
        Self::validate_name(&stored.name)?;
        Ok(Self {
            id: stored.id,
            name: stored.name,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        })
    }

    pub fn validate_name(value: &str) -> Result<(), DomainError> {
        require_text("Amenity name", value, NAME_MAX_CHARS)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Entity for Amenity {
    type Patch = AmenityPatch;

    const KIND: &'static str = "Amenity";
    const ATTRIBUTES: &'static [&'static str] = &["id", "name"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn apply(&mut self, patch: AmenityPatch) -> Result<(), DomainError> {
        if let Some(name) = patch.name {
            Self::validate_name(&name)?;
            self.name = name;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}
