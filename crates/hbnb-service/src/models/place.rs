//! Place payloads

use serde::Deserialize;

/// Create place request
#[derive(Debug, Clone, Deserialize)]
pub struct NewPlace {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    pub owner_id: String,
    #[serde(default)]
    pub amenities: Vec<String>,
}

impl NewPlace {
    /// Defaults: empty description, zero price and coordinates, no amenities
    pub fn new(title: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            price: 0.0,
            latitude: 0.0,
            longitude: 0.0,
            owner_id: owner_id.into(),
            amenities: Vec::new(),
        }
    }
}

/// Update place request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub owner_id: Option<String>,
    pub amenities: Option<Vec<String>>,
}
