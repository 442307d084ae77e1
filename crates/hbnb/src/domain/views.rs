//! Read views
//!
//! List views use `Entity::to_record` with references flattened to ids.
//! The place detail view expands owner, amenities and reviews into the
//! summaries below.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::{Amenity, Entity, Place, Review, User};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnerSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<&User> for OwnerSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
            email: user.email().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmenitySummary {
    pub id: Uuid,
    pub name: String,
}

impl From<&Amenity> for AmenitySummary {
    fn from(amenity: &Amenity) -> Self {
        Self {
            id: amenity.id(),
            name: amenity.name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewSummary {
    pub id: Uuid,
    pub text: String,
    pub rating: u8,
    pub user_id: Uuid,
}

impl From<&Review> for ReviewSummary {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id(),
            text: review.text().to_string(),
            rating: review.rating().value(),
            user_id: review.user_id(),
        }
    }
}

/// Place with its references resolved to nested summaries
#[derive(Debug, Clone, Serialize)]
pub struct PlaceDetails {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    /// `None` only if the owner vanished from storage behind the facade's back
    pub owner: Option<OwnerSummary>,
    pub amenities: Vec<AmenitySummary>,
    pub reviews: Vec<ReviewSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PlaceDetails {
    pub fn assemble(
        place: &Place,
        owner: Option<&User>,
        amenities: &[Amenity],
        reviews: &[Review],
    ) -> Self {
        Self {
            id: place.id(),
            title: place.title().to_string(),
            description: place.description().to_string(),
            price: place.price(),
            latitude: place.latitude(),
            longitude: place.longitude(),
            owner: owner.map(OwnerSummary::from),
            amenities: amenities.iter().map(AmenitySummary::from).collect(),
            reviews: reviews.iter().map(ReviewSummary::from).collect(),
            created_at: place.created_at(),
            updated_at: place.updated_at(),
        }
    }
}
