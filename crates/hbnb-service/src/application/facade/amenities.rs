//! Amenity operations

use hbnb::{Amenity, AmenityPatch, DomainError, Entity};

use super::{parse_id, Facade};
use crate::models::{AmenityChanges, NewAmenity};

impl Facade {
    pub async fn create_amenity(&self, input: NewAmenity) -> Result<Amenity, DomainError> {
        let _guard = self.writes.lock().await;

        let amenity = self.amenities.add(Amenity::new(input.name)?).await?;
        tracing::info!("Created amenity: {} ({})", amenity.name(), amenity.id());

        Ok(amenity)
    }

    pub async fn get_amenity(&self, id: &str) -> Result<Option<Amenity>, DomainError> {
        match parse_id(id) {
            Some(id) => self.amenities.get(id).await,
            None => Ok(None),
        }
    }

    pub async fn get_all_amenities(&self) -> Result<Vec<Amenity>, DomainError> {
        self.amenities.get_all().await
    }

    pub async fn update_amenity(
        &self,
        id: &str,
        changes: AmenityChanges,
    ) -> Result<Option<Amenity>, DomainError> {
        let _guard = self.writes.lock().await;

        let Some(id) = parse_id(id) else {
            return Ok(None);
        };

        self.amenities
            .update(id, AmenityPatch { name: changes.name })
            .await
    }

    /// Places keep their reference; detail views skip it
    pub async fn delete_amenity(&self, id: &str) -> Result<bool, DomainError> {
        let _guard = self.writes.lock().await;

        let Some(id) = parse_id(id) else {
            return Ok(false);
        };

        let deleted = self.amenities.delete(id).await?;
        if deleted {
            tracing::info!("Deleted amenity: {}", id);
        }
        Ok(deleted)
    }
}
