//! Review operations

use serde_json::json;
use uuid::Uuid;

use hbnb::{DomainError, Entity, Rating, Review, ReviewPatch};

use super::{parse_id, resolve, Facade};
use crate::models::{NewReview, ReviewChanges};

impl Facade {
    pub async fn create_review(&self, input: NewReview) -> Result<Review, DomainError> {
        let _guard = self.writes.lock().await;

        Review::validate_text(&input.text)?;
        Rating::new(input.rating)?;

        let user = resolve(self.users.as_ref(), "User", &input.user_id).await?;
        let place = resolve(self.places.as_ref(), "Place", &input.place_id).await?;

        let review = Review::new(input.text, input.rating, place.id(), user.id())?;
        let review = self.reviews.add(review).await?;
        tracing::info!("Created review {} for place {}", review.id(), place.id());

        Ok(review)
    }

    pub async fn get_review(&self, id: &str) -> Result<Option<Review>, DomainError> {
        match parse_id(id) {
            Some(id) => self.reviews.get(id).await,
            None => Ok(None),
        }
    }

    pub async fn get_all_reviews(&self) -> Result<Vec<Review>, DomainError> {
        self.reviews.get_all().await
    }

    /// `None` when the place is unknown
    pub async fn get_reviews_by_place(
        &self,
        place_id: &str,
    ) -> Result<Option<Vec<Review>>, DomainError> {
        let Some(place) = self.get_place(place_id).await? else {
            return Ok(None);
        };
        Ok(Some(self.reviews_of_place(place.id()).await?))
    }

    /// `None` when the user is unknown
    pub async fn get_reviews_by_user(
        &self,
        user_id: &str,
    ) -> Result<Option<Vec<Review>>, DomainError> {
        let Some(user) = self.get_user(user_id).await? else {
            return Ok(None);
        };

        let reviews = self
            .reviews
            .filter_by_attribute("user_id", &json!(user.id().to_string()))
            .await?;
        Ok(Some(reviews))
    }

    /// Text and rating only; a review never moves to another place or author
    pub async fn update_review(
        &self,
        id: &str,
        changes: ReviewChanges,
    ) -> Result<Option<Review>, DomainError> {
        let _guard = self.writes.lock().await;

        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        if self.reviews.get(id).await?.is_none() {
            return Ok(None);
        }

        if changes.user_id.is_some() {
            return Err(DomainError::validation("Cannot change the user_id of a review"));
        }
        if changes.place_id.is_some() {
            return Err(DomainError::validation("Cannot change the place_id of a review"));
        }

        let patch = ReviewPatch {
            text: changes.text,
            rating: changes.rating,
        };

        let updated = self.reviews.update(id, patch).await?;
        if updated.is_some() {
            tracing::info!("Updated review: {}", id);
        }
        Ok(updated)
    }

    pub async fn delete_review(&self, id: &str) -> Result<bool, DomainError> {
        let _guard = self.writes.lock().await;

        let Some(id) = parse_id(id) else {
            return Ok(false);
        };

        let deleted = self.reviews.delete(id).await?;
        if deleted {
            tracing::info!("Deleted review: {}", id);
        }
        Ok(deleted)
    }

    pub(super) async fn reviews_of_place(&self, place_id: Uuid) -> Result<Vec<Review>, DomainError> {
        self.reviews
            .filter_by_attribute("place_id", &json!(place_id.to_string()))
            .await
    }
}
