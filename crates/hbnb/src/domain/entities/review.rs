//! Review - a user's rating of a place
//!
//! `place_id` and `user_id` are fixed at construction; `ReviewPatch` has no
//! way to express a change to them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::Entity;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::Rating;

#[derive(Debug, Clone, Serialize)]
pub struct Review {
    id: Uuid,
    text: String,
    rating: Rating,
    place_id: Uuid,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ReviewPatch {
    pub text: Option<String>,
    pub rating: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct StoredReview {
    pub id: Uuid,
    pub text: String,
    pub rating: i64,
    pub place_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn new(
        text: String,
        rating: i64,
        place_id: Uuid,
        user_id: Uuid,
    ) -> Result<Self, DomainError> {
        Self::validate_text(&text)?;
        let rating = Rating::new(rating)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            text,
            rating,
            place_id,
            user_id,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn restore(stored: StoredReview) -> Result<Self, DomainError> {
        Self::validate_text(&stored.text)?;
        Ok(Self {
            id: stored.id,
            text: stored.text,
            rating: Rating::new(stored.rating)?,
            place_id: stored.place_id,
            user_id: stored.user_id,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        })
    }

    pub fn validate_text(value: &str) -> Result<(), DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::validation("Review text cannot be empty"));
        }
        Ok(())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn place_id(&self) -> Uuid {
        self.place_id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }
}

impl Entity for Review {
    type Patch = ReviewPatch;

    const KIND: &'static str = "Review";
    const ATTRIBUTES: &'static [&'static str] = &["id", "text", "rating", "place_id", "user_id"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn apply(&mut self, patch: ReviewPatch) -> Result<(), DomainError> {
        let text = match patch.text {
            Some(text) => {
                Self::validate_text(&text)?;
                text
            }
            None => self.text.clone(),
        };
        let rating = match patch.rating {
            Some(rating) => Rating::new(rating)?,
            None => self.rating,
        };

        self.text = text;
        self.rating = rating;
        self.updated_at = Utc::now();
        Ok(())
    }
}
