//! Amenity payloads

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct NewAmenity {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AmenityChanges {
    pub name: Option<String>,
}
