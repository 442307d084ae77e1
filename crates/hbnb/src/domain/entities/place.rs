//! Place - rental listing owned by a User
//!
//! Pure domain entity without infrastructure dependencies.
//! Only forward references are held: the owner id and the amenity ids.
//! Reviews of a place are found through the review repository.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::Entity;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{require_range, require_text};

const TITLE_MAX_CHARS: usize = 100;

/// Rental place
#[derive(Debug, Clone, Serialize)]
pub struct Place {
    id: Uuid,
    title: String,
    description: String,
    price: f64,
    latitude: f64,
    longitude: f64,
    owner_id: Uuid,
    /// Amenity ids in insertion order, without duplicates
    amenities: Vec<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Partial update for a Place; `None` leaves the field untouched.
/// `amenities` replaces the whole set when present.
#[derive(Debug, Clone, Default)]
pub struct PlacePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub owner_id: Option<Uuid>,
    pub amenities: Option<Vec<Uuid>>,
}

/// Field values as persisted by a storage backend
#[derive(Debug, Clone)]
pub struct StoredPlace {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub owner_id: Uuid,
    pub amenities: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Place {
    /// Create a new Place with generated ID and timestamps
    pub fn new(
        title: String,
        description: String,
        price: f64,
        latitude: f64,
        longitude: f64,
        owner_id: Uuid,
    ) -> Result<Self, DomainError> {
        Self::validate_title(&title)?;
        Self::validate_price(price)?;
        Self::validate_latitude(latitude)?;
        Self::validate_longitude(longitude)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            title,
            description,
            price,
            latitude,
            longitude,
            owner_id,
            amenities: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild a Place from storage, re-checking every invariant
    pub fn restore(stored: StoredPlace) -> Result<Self, DomainError> {
        Self::validate_title(&stored.title)?;
        Self::validate_price(stored.price)?;
        Self::validate_latitude(stored.latitude)?;
        Self::validate_longitude(stored.longitude)?;
        Ok(Self {
            id: stored.id,
            title: stored.title,
            description: stored.description,
            price: stored.price,
            latitude: stored.latitude,
            longitude: stored.longitude,
            owner_id: stored.owner_id,
            amenities: dedup(stored.amenities),
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        })
    }

    /// Attach amenities at construction time
    pub fn with_amenities(mut self, amenities: Vec<Uuid>) -> Self {
        self.amenities = dedup(amenities);
        self
    }

    pub fn validate_title(value: &str) -> Result<(), DomainError> {
        require_text("Title", value, TITLE_MAX_CHARS)
    }

    pub fn validate_price(value: f64) -> Result<(), DomainError> {
        if !value.is_finite() || value < 0.0 {
            return Err(DomainError::validation("Price cannot be negative"));
        }
        Ok(())
    }

    pub fn validate_latitude(value: f64) -> Result<(), DomainError> {
        require_range("Latitude", value, -90.0, 90.0)
    }

    pub fn validate_longitude(value: f64) -> Result<(), DomainError> {
        require_range("Longitude", value, -180.0, 180.0)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    pub fn amenities(&self) -> &[Uuid] {
        &self.amenities
    }

    fn set_title(&mut self, value: String) -> Result<(), DomainError> {
        Self::validate_title(&value)?;
        self.title = value;
        Ok(())
    }

    fn set_price(&mut self, value: f64) -> Result<(), DomainError> {
        Self::validate_price(value)?;
        self.price = value;
        Ok(())
    }

    fn set_latitude(&mut self, value: f64) -> Result<(), DomainError> {
        Self::validate_latitude(value)?;
        self.latitude = value;
        Ok(())
    }

    fn set_longitude(&mut self, value: f64) -> Result<(), DomainError> {
        Self::validate_longitude(value)?;
        self.longitude = value;
        Ok(())
    }
}

fn dedup(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}

impl Entity for Place {
    type Patch = PlacePatch;

    const KIND: &'static str = "Place";
    const ATTRIBUTES: &'static [&'static str] = &[
        "id",
        "title",
        "description",
        "price",
        "latitude",
        "longitude",
        "owner_id",
    ];

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn apply(&mut self, patch: PlacePatch) -> Result<(), DomainError> {
        let mut next = self.clone();
        if let Some(title) = patch.title {
            next.set_title(title)?;
        }
        if let Some(description) = patch.description {
            next.description = description;
        }
        if let Some(price) = patch.price {
            next.set_price(price)?;
        }
        if let Some(latitude) = patch.latitude {
            next.set_latitude(latitude)?;
        }
        if let Some(longitude) = patch.longitude {
            next.set_longitude(longitude)?;
        }
        if let Some(owner_id) = patch.owner_id {
            next.owner_id = owner_id;
        }
        if let Some(amenities) = patch.amenities {
            next.amenities = dedup(amenities);
        }
        next.updated_at = Utc::now();
        *self = next;
        Ok(())
    }
}
