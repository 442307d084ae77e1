#![allow(dead_code)]

use std::sync::Arc;

use chrono::Duration;

use hbnb_service::adapters::sqlite;
use hbnb_service::models::{NewAmenity, NewPlace, NewUser};
use hbnb_service::{Facade, HmacTokenIssuer, Pbkdf2Hasher, Repositories};

pub const TEST_SECRET: &str = "test-secret";

#[derive(Debug, Clone, Copy)]
pub enum Backend {
    Memory,
    Sqlite,
}

pub const BACKENDS: [Backend; 2] = [Backend::Memory, Backend::Sqlite];

pub async fn repositories(backend: Backend) -> Repositories {
    match backend {
        Backend::Memory => Repositories::in_memory(),
        Backend::Sqlite => {
            let pool = sqlite::open("sqlite::memory:")
                .await
                .expect("in-memory sqlite");
            Repositories::sqlite(pool)
        }
    }
}

pub fn token_issuer() -> HmacTokenIssuer {
    HmacTokenIssuer::new(TEST_SECRET, Duration::minutes(5))
}

pub fn facade_over(repositories: Repositories) -> Facade {
    Facade::new(
        repositories,
        Arc::new(Pbkdf2Hasher::with_rounds(1)),
        Arc::new(token_issuer()),
    )
}

pub async fn facade(backend: Backend) -> Facade {
    facade_over(repositories(backend).await)
}

pub fn john() -> NewUser {
    NewUser::new("John", "Doe", "john.doe@example.com")
}

pub fn jane() -> NewUser {
    NewUser::new("Jane", "Roe", "jane.roe@example.com")
}

pub fn apartment(owner_id: &str) -> NewPlace {
    NewPlace {
        price: 120.5,
        latitude: 43.29,
        longitude: 5.37,
        ..NewPlace::new("Apartment", owner_id)
    }
}

pub fn amenity(name: &str) -> NewAmenity {
    NewAmenity {
        name: name.to_string(),
    }
}
