//! File-backed SQLite storage survives a restart

mod common;

use common::{amenity, apartment, facade_over, john};
use hbnb::Entity;
use hbnb_service::adapters::sqlite;
use hbnb_service::models::{NewAdmin, NewPlace, NewReview};
use hbnb_service::{build_facade, Config, Repositories, StorageBackend};

#[tokio::test]
async fn test_data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("hbnb.db").display());

    let (user_id, place_id, wifi_id) = {
        let pool = sqlite::open(&url).await.unwrap();
        let facade = facade_over(Repositories::sqlite(pool.clone()));

        let user = facade.create_user(john().password("s3cret")).await.unwrap();
        let wifi = facade.create_amenity(amenity("WiFi")).await.unwrap();
        let place = facade
            .create_place(NewPlace {
                amenities: vec![wifi.id().to_string()],
                ..apartment(&user.id().to_string())
            })
            .await
            .unwrap();
        facade
            .create_review(NewReview {
                text: "Great!".into(),
                rating: 5,
                place_id: place.id().to_string(),
                user_id: user.id().to_string(),
            })
            .await
            .unwrap();

        pool.close().await;
        (user.id(), place.id(), wifi.id())
    };

    let pool = sqlite::open(&url).await.unwrap();
    let facade = facade_over(Repositories::sqlite(pool));

    let user = facade
        .get_user_by_email("john.doe@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.id(), user_id);
    assert!(user.password_hash().is_some());

    let details = facade
        .get_place_details(&place_id.to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(details.title, "Apartment");
    assert_eq!(details.price, 120.5);
    assert_eq!(details.amenities.len(), 1);
    assert_eq!(details.amenities[0].id, wifi_id);
    assert_eq!(details.reviews.len(), 1);
    assert_eq!(details.reviews[0].text, "Great!");

    // Credentials survive too
    assert!(facade
        .authenticate("john.doe@example.com", "s3cret")
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_build_facade_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("configured.db").display());

    let config = Config::from_lookup(|key| match key {
        "HBNB_ENV" => Some("testing".to_string()),
        "HBNB_STORAGE" => Some("sqlite".to_string()),
        "DATABASE_URL" => Some(url.clone()),
        _ => None,
    })
    .unwrap();
    assert_eq!(config.storage, StorageBackend::Sqlite);

    let facade = build_facade(&config).await.unwrap();
    let admin = facade
        .provision_admin(NewAdmin {
            first_name: "Ada".into(),
            last_name: "Admin".into(),
            email: "admin@hbnb.io".into(),
            password: "admin-password".into(),
        })
        .await
        .unwrap();
    assert!(admin.is_admin());
    drop(facade);

    let facade = build_facade(&config).await.unwrap();
    let stored = facade.get_user_by_email("admin@hbnb.io").await.unwrap().unwrap();
    assert_eq!(stored.id(), admin.id());
    assert!(stored.is_admin());
}
