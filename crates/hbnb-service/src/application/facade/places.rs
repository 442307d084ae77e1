//! Place operations

use serde_json::json;
use uuid::Uuid;

use hbnb::{Amenity, DomainError, Entity, Place, PlaceDetails, PlacePatch};

use super::{parse_id, resolve, Facade};
use crate::models::{NewPlace, PlaceChanges};

impl Facade {
    /// Create a place owned by an existing user
    pub async fn create_place(&self, input: NewPlace) -> Result<Place, DomainError> {
        let _guard = self.writes.lock().await;

        Place::validate_title(&input.title)?;
        Place::validate_price(input.price)?;
        Place::validate_latitude(input.latitude)?;
        Place::validate_longitude(input.longitude)?;

        let owner = resolve(self.users.as_ref(), "Owner", &input.owner_id).await?;
        let amenities = self.resolve_amenities(&input.amenities).await?;

        let place = Place::new(
            input.title,
            input.description,
            input.price,
            input.latitude,
            input.longitude,
            owner.id(),
        )?
        .with_amenities(amenities);

        let place = self.places.add(place).await?;
        tracing::info!("Created place: {} ({})", place.title(), place.id());

        Ok(place)
    }

    pub async fn get_place(&self, id: &str) -> Result<Option<Place>, DomainError> {
        match parse_id(id) {
            Some(id) => self.places.get(id).await,
            None => Ok(None),
        }
    }

    pub async fn get_all_places(&self) -> Result<Vec<Place>, DomainError> {
        self.places.get_all().await
    }

    /// Place with owner, amenities and reviews expanded
    pub async fn get_place_details(&self, id: &str) -> Result<Option<PlaceDetails>, DomainError> {
        let Some(place) = self.get_place(id).await? else {
            return Ok(None);
        };

        let owner = self.users.get(place.owner_id()).await?;

        let mut amenities = Vec::with_capacity(place.amenities().len());
        for amenity_id in place.amenities() {
            // Deleted amenities are skipped
            if let Some(amenity) = self.amenities.get(*amenity_id).await? {
                amenities.push(amenity);
            }
        }

        let reviews = self.reviews_of_place(place.id()).await?;

        Ok(Some(PlaceDetails::assemble(
            &place,
            owner.as_ref(),
            &amenities,
            &reviews,
        )))
    }

    /// `None` when the owner is unknown
    pub async fn get_places_by_owner(
        &self,
        owner_id: &str,
    ) -> Result<Option<Vec<Place>>, DomainError> {
        let Some(owner) = self.get_user(owner_id).await? else {
            return Ok(None);
        };

        let places = self
            .places
            .filter_by_attribute("owner_id", &json!(owner.id().to_string()))
            .await?;
        Ok(Some(places))
    }

    pub async fn update_place(
        &self,
        id: &str,
        changes: PlaceChanges,
    ) -> Result<Option<Place>, DomainError> {
        let _guard = self.writes.lock().await;

        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        if self.places.get(id).await?.is_none() {
            return Ok(None);
        }

        if let Some(title) = &changes.title {
            Place::validate_title(title)?;
        }
        if let Some(price) = changes.price {
            Place::validate_price(price)?;
        }
        if let Some(latitude) = changes.latitude {
            Place::validate_latitude(latitude)?;
        }
        if let Some(longitude) = changes.longitude {
            Place::validate_longitude(longitude)?;
        }

        let owner_id = match &changes.owner_id {
            Some(raw) => Some(resolve(self.users.as_ref(), "Owner", raw).await?.id()),
            None => None,
        };
        let amenities = match &changes.amenities {
            Some(raw) => Some(self.resolve_amenities(raw).await?),
            None => None,
        };

        let patch = PlacePatch {
            title: changes.title,
            description: changes.description,
            price: changes.price,
            latitude: changes.latitude,
            longitude: changes.longitude,
            owner_id,
            amenities,
        };

        let updated = self.places.update(id, patch).await?;
        if updated.is_some() {
            tracing::info!("Updated place: {}", id);
        }
        Ok(updated)
    }

    /// Reviews of the place are left in place
    pub async fn delete_place(&self, id: &str) -> Result<bool, DomainError> {
        let _guard = self.writes.lock().await;

        let Some(id) = parse_id(id) else {
            return Ok(false);
        };

        let deleted = self.places.delete(id).await?;
        if deleted {
            tracing::info!("Deleted place: {}", id);
        }
        Ok(deleted)
    }

    async fn resolve_amenities(&self, raw_ids: &[String]) -> Result<Vec<Uuid>, DomainError> {
        let mut ids = Vec::with_capacity(raw_ids.len());
        for raw in raw_ids {
            let amenity: Amenity = resolve(self.amenities.as_ref(), "Amenity", raw).await?;
            ids.push(amenity.id());
        }
        Ok(ids)
    }
}
