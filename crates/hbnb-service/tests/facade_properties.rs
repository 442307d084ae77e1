//! Business rules enforced by the facade, checked on both storage backends

mod common;

use uuid::Uuid;

use common::{amenity, apartment, facade, jane, john, BACKENDS};
use hbnb::{DomainError, Entity};
use hbnb_service::models::{
    AmenityChanges, NewPlace, NewReview, NewUser, PlaceChanges, ReviewChanges, UserChanges,
};

fn review(text: &str, rating: i64, place_id: Uuid, user_id: Uuid) -> NewReview {
    NewReview {
        text: text.to_string(),
        rating,
        place_id: place_id.to_string(),
        user_id: user_id.to_string(),
    }
}

#[tokio::test]
async fn test_valid_user_round_trips_through_record() {
    for backend in BACKENDS {
        let facade = facade(backend).await;
        let user = facade.create_user(john()).await.unwrap();

        let record = user.to_record();
        assert_eq!(record["first_name"], "John", "{backend:?}");
        assert_eq!(record["last_name"], "Doe", "{backend:?}");
        assert_eq!(record["email"], "john.doe@example.com", "{backend:?}");
        assert_eq!(record["is_admin"], false, "{backend:?}");
        assert_eq!(record["id"], user.id().to_string(), "{backend:?}");

        let stored = facade
            .get_user(&user.id().to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.to_record()["email"], record["email"], "{backend:?}");
    }
}

#[tokio::test]
async fn test_invalid_user_fields_are_rejected() {
    for backend in BACKENDS {
        let facade = facade(backend).await;

        let cases = [
            NewUser::new("", "Doe", "a@example.com"),
            NewUser::new("John", "D".repeat(51), "a@example.com"),
            NewUser::new("John", "Doe", "not-an-email"),
            NewUser::new("John", "Doe", ""),
        ];
        for input in cases {
            let err = facade.create_user(input).await.unwrap_err();
            assert!(err.is_validation(), "{backend:?}");
        }

        assert!(facade.get_users().await.unwrap().is_empty(), "{backend:?}");
    }
}

#[tokio::test]
async fn test_email_is_unique() {
    for backend in BACKENDS {
        let facade = facade(backend).await;
        facade.create_user(john()).await.unwrap();
        let jane = facade.create_user(jane()).await.unwrap();

        let err = facade
            .create_user(NewUser::new("Johnny", "Doe", "john.doe@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::validation("Email already registered"));

        let err = facade
            .update_user(
                &jane.id().to_string(),
                UserChanges {
                    email: Some("john.doe@example.com".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::validation("Email already registered"));

        // Re-submitting one's own email is not a conflict
        let same = facade
            .update_user(
                &jane.id().to_string(),
                UserChanges {
                    email: Some("jane.roe@example.com".into()),
                    first_name: Some("Janet".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(same.first_name(), "Janet", "{backend:?}");
    }
}

#[tokio::test]
async fn test_test_users_are_hidden_from_listing() {
    for backend in BACKENDS {
        let facade = facade(backend).await;
        let visible = facade.create_user(john()).await.unwrap();
        let hidden = facade.create_user(jane().test_user()).await.unwrap();

        let listed: Vec<Uuid> = facade
            .get_users()
            .await
            .unwrap()
            .iter()
            .map(Entity::id)
            .collect();
        assert_eq!(listed, vec![visible.id()], "{backend:?}");

        // Still reachable directly
        assert!(facade
            .get_user(&hidden.id().to_string())
            .await
            .unwrap()
            .is_some());
    }
}

#[tokio::test]
async fn test_place_with_unknown_owner_persists_nothing() {
    for backend in BACKENDS {
        let facade = facade(backend).await;

        for owner in ["does-not-exist".to_string(), Uuid::new_v4().to_string()] {
            let err = facade.create_place(apartment(&owner)).await.unwrap_err();
            assert_eq!(
                err,
                DomainError::missing_reference("Owner", &owner),
                "{backend:?}"
            );
        }

        assert!(facade.get_all_places().await.unwrap().is_empty(), "{backend:?}");
    }
}

#[tokio::test]
async fn test_place_field_validation() {
    for backend in BACKENDS {
        let facade = facade(backend).await;
        let owner = facade.create_user(john()).await.unwrap().id().to_string();

        let invalid = [
            NewPlace::new("", owner.as_str()),
            NewPlace::new("T".repeat(101), owner.as_str()),
            NewPlace {
                price: -1.0,
                ..NewPlace::new("Loft", owner.as_str())
            },
            NewPlace {
                price: f64::INFINITY,
                ..NewPlace::new("Loft", owner.as_str())
            },
            NewPlace {
                latitude: -90.5,
                ..NewPlace::new("Loft", owner.as_str())
            },
            NewPlace {
                longitude: 180.5,
                ..NewPlace::new("Loft", owner.as_str())
            },
            NewPlace {
                longitude: f64::NAN,
                ..NewPlace::new("Loft", owner.as_str())
            },
        ];
        for input in invalid {
            assert!(facade.create_place(input).await.unwrap_err().is_validation());
        }

        let edge = facade
            .create_place(NewPlace {
                latitude: 90.0,
                longitude: -180.0,
                ..NewPlace::new("Pole", owner.as_str())
            })
            .await
            .unwrap();
        assert_eq!(edge.price(), 0.0, "{backend:?}");
        assert_eq!(edge.description(), "", "{backend:?}");
        assert_eq!(facade.get_all_places().await.unwrap().len(), 1, "{backend:?}");
    }
}

#[tokio::test]
async fn test_place_amenities_must_exist() {
    for backend in BACKENDS {
        let facade = facade(backend).await;
        let owner = facade.create_user(john()).await.unwrap().id().to_string();
        let wifi = facade.create_amenity(amenity("WiFi")).await.unwrap();
        let missing = Uuid::new_v4().to_string();

        let err = facade
            .create_place(NewPlace {
                amenities: vec![wifi.id().to_string(), missing.clone()],
                ..apartment(&owner)
            })
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::missing_reference("Amenity", &missing));
        assert!(facade.get_all_places().await.unwrap().is_empty(), "{backend:?}");

        let place = facade
            .create_place(NewPlace {
                amenities: vec![wifi.id().to_string(), wifi.id().to_string()],
                ..apartment(&owner)
            })
            .await
            .unwrap();
        assert_eq!(place.amenities(), &[wifi.id()], "{backend:?}");
    }
}

#[tokio::test]
async fn test_update_place_reresolves_references() {
    for backend in BACKENDS {
        let facade = facade(backend).await;
        let john = facade.create_user(john()).await.unwrap();
        let jane = facade.create_user(jane()).await.unwrap();
        let place = facade
            .create_place(apartment(&john.id().to_string()))
            .await
            .unwrap();
        let place_id = place.id().to_string();

        let err = facade
            .update_place(
                &place_id,
                PlaceChanges {
                    owner_id: Some("does-not-exist".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::missing_reference("Owner", "does-not-exist"));

        let moved = facade
            .update_place(
                &place_id,
                PlaceChanges {
                    owner_id: Some(jane.id().to_string()),
                    price: Some(150.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(moved.owner_id(), jane.id(), "{backend:?}");
        assert_eq!(moved.price(), 150.0, "{backend:?}");
        assert_eq!(moved.title(), "Apartment", "{backend:?}");

        let unknown = facade
            .update_place(&Uuid::new_v4().to_string(), PlaceChanges::default())
            .await
            .unwrap();
        assert!(unknown.is_none(), "{backend:?}");
    }
}

#[tokio::test]
async fn test_review_rating_bounds() {
    for backend in BACKENDS {
        let facade = facade(backend).await;
        let user = facade.create_user(john()).await.unwrap();
        let place = facade
            .create_place(apartment(&user.id().to_string()))
            .await
            .unwrap();

        for rating in [0, 6, -1] {
            let err = facade
                .create_review(review("Hmm", rating, place.id(), user.id()))
                .await
                .unwrap_err();
            assert!(err.is_validation(), "{backend:?} {rating}");
        }
        assert!(facade.get_all_reviews().await.unwrap().is_empty(), "{backend:?}");

        for rating in [1, 5] {
            let created = facade
                .create_review(review("Fine", rating, place.id(), user.id()))
                .await
                .unwrap();
            assert_eq!(i64::from(created.rating().value()), rating, "{backend:?}");
        }
        assert_eq!(facade.get_all_reviews().await.unwrap().len(), 2, "{backend:?}");
    }
}

#[tokio::test]
async fn test_review_references_must_exist() {
    for backend in BACKENDS {
        let facade = facade(backend).await;
        let user = facade.create_user(john()).await.unwrap();
        let place = facade
            .create_place(apartment(&user.id().to_string()))
            .await
            .unwrap();
        let ghost = Uuid::new_v4();

        let err = facade
            .create_review(review("Nice", 4, place.id(), ghost))
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::missing_reference("User", &ghost.to_string()));

        let err = facade
            .create_review(review("Nice", 4, ghost, user.id()))
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::missing_reference("Place", &ghost.to_string()));

        let err = facade
            .create_review(review("   ", 4, place.id(), user.id()))
            .await
            .unwrap_err();
        assert!(err.is_validation(), "{backend:?}");

        assert!(facade.get_all_reviews().await.unwrap().is_empty(), "{backend:?}");
    }
}

#[tokio::test]
async fn test_review_references_are_immutable() {
    for backend in BACKENDS {
        let facade = facade(backend).await;
        let user = facade.create_user(john()).await.unwrap();
        let place = facade
            .create_place(apartment(&user.id().to_string()))
            .await
            .unwrap();
        let created = facade
            .create_review(review("Great!", 5, place.id(), user.id()))
            .await
            .unwrap();
        let review_id = created.id().to_string();

        // Rejected even when the value is unchanged
        let attempts = [
            ReviewChanges {
                user_id: Some(user.id().to_string()),
                ..Default::default()
            },
            ReviewChanges {
                place_id: Some(place.id().to_string()),
                ..Default::default()
            },
            ReviewChanges {
                text: Some("Updated".into()),
                place_id: Some(Uuid::new_v4().to_string()),
                ..Default::default()
            },
        ];
        for changes in attempts {
            let err = facade.update_review(&review_id, changes).await.unwrap_err();
            assert!(err.is_validation(), "{backend:?}");
        }

        let stored = facade.get_review(&review_id).await.unwrap().unwrap();
        assert_eq!(stored.text(), "Great!", "{backend:?}");

        let updated = facade
            .update_review(
                &review_id,
                ReviewChanges {
                    text: Some("Still great".into()),
                    rating: Some(4),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.text(), "Still great", "{backend:?}");
        assert_eq!(updated.rating().value(), 4, "{backend:?}");
        assert_eq!(updated.place_id(), place.id(), "{backend:?}");
        assert_eq!(updated.user_id(), user.id(), "{backend:?}");
    }
}

#[tokio::test]
async fn test_delete_reports_existence() {
    for backend in BACKENDS {
        let facade = facade(backend).await;

        assert!(!facade.delete_amenity(&Uuid::new_v4().to_string()).await.unwrap());
        assert!(!facade.delete_amenity("not-a-uuid").await.unwrap());
        assert!(!facade.delete_place("not-a-uuid").await.unwrap());
        assert!(!facade.delete_review("").await.unwrap());
        assert!(!facade.delete_user("nope").await.unwrap());

        let wifi = facade.create_amenity(amenity("WiFi")).await.unwrap();
        let pool = facade.create_amenity(amenity("Pool")).await.unwrap();

        assert!(facade.delete_amenity(&wifi.id().to_string()).await.unwrap());
        let remaining: Vec<Uuid> = facade
            .get_all_amenities()
            .await
            .unwrap()
            .iter()
            .map(Entity::id)
            .collect();
        assert_eq!(remaining, vec![pool.id()], "{backend:?}");
        assert!(!facade.delete_amenity(&wifi.id().to_string()).await.unwrap());
    }
}

#[tokio::test]
async fn test_invalid_id_strings_behave_as_unknown() {
    for backend in BACKENDS {
        let facade = facade(backend).await;

        assert!(facade.get_user("garbage").await.unwrap().is_none());
        assert!(facade.get_place("garbage").await.unwrap().is_none());
        assert!(facade.get_amenity("garbage").await.unwrap().is_none());
        assert!(facade.get_review("garbage").await.unwrap().is_none());
        assert!(facade.get_place_details("garbage").await.unwrap().is_none());
        assert!(facade.get_reviews_by_place("garbage").await.unwrap().is_none());
        assert!(facade.get_reviews_by_user("garbage").await.unwrap().is_none());
        assert!(facade.get_places_by_owner("garbage").await.unwrap().is_none());
        assert!(facade
            .update_amenity("garbage", AmenityChanges { name: Some("X".into()) })
            .await
            .unwrap()
            .is_none());
        assert!(facade
            .update_user("garbage", UserChanges::default())
            .await
            .unwrap()
            .is_none(), "{backend:?}");
    }
}

#[tokio::test]
async fn test_user_owning_places_cannot_be_deleted() {
    for backend in BACKENDS {
        let facade = facade(backend).await;
        let owner = facade.create_user(john()).await.unwrap();
        let author = facade.create_user(jane()).await.unwrap();
        let place = facade
            .create_place(apartment(&owner.id().to_string()))
            .await
            .unwrap();
        let written = facade
            .create_review(review("Lovely", 5, place.id(), author.id()))
            .await
            .unwrap();

        let err = facade.delete_user(&owner.id().to_string()).await.unwrap_err();
        assert!(err.is_validation(), "{backend:?}");
        assert!(facade
            .get_user(&owner.id().to_string())
            .await
            .unwrap()
            .is_some());

        // Authors can go; their reviews stay
        assert!(facade.delete_user(&author.id().to_string()).await.unwrap());
        assert!(facade
            .get_review(&written.id().to_string())
            .await
            .unwrap()
            .is_some(), "{backend:?}");

        // Once the place is gone the owner can be removed
        assert!(facade.delete_place(&place.id().to_string()).await.unwrap());
        assert!(facade.delete_user(&owner.id().to_string()).await.unwrap());
    }
}

#[tokio::test]
async fn test_deleting_a_place_keeps_its_reviews() {
    for backend in BACKENDS {
        let facade = facade(backend).await;
        let user = facade.create_user(john()).await.unwrap();
        let place = facade
            .create_place(apartment(&user.id().to_string()))
            .await
            .unwrap();
        facade
            .create_review(review("Great!", 5, place.id(), user.id()))
            .await
            .unwrap();

        assert!(facade.delete_place(&place.id().to_string()).await.unwrap());
        assert_eq!(facade.get_all_reviews().await.unwrap().len(), 1, "{backend:?}");
        assert!(facade
            .get_reviews_by_place(&place.id().to_string())
            .await
            .unwrap()
            .is_none(), "{backend:?}");
    }
}

#[tokio::test]
async fn test_john_doe_scenario() {
    for backend in BACKENDS {
        let facade = facade(backend).await;

        let john = facade.create_user(john()).await.unwrap();
        let place = facade
            .create_place(apartment(&john.id().to_string()))
            .await
            .unwrap();
        assert_eq!(place.title(), "Apartment", "{backend:?}");
        assert_eq!(place.price(), 120.5, "{backend:?}");
        assert_eq!(place.latitude(), 43.29, "{backend:?}");
        assert_eq!(place.longitude(), 5.37, "{backend:?}");
        assert_eq!(place.owner_id(), john.id(), "{backend:?}");

        let great = facade
            .create_review(review("Great!", 5, place.id(), john.id()))
            .await
            .unwrap();

        let reviews = facade
            .get_reviews_by_place(&place.id().to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reviews.len(), 1, "{backend:?}");
        assert_eq!(reviews[0].id(), great.id(), "{backend:?}");
        assert_eq!(reviews[0].text(), "Great!", "{backend:?}");
        assert_eq!(reviews[0].rating().value(), 5, "{backend:?}");

        let before: Vec<Uuid> = facade
            .get_all_places()
            .await
            .unwrap()
            .iter()
            .map(Entity::id)
            .collect();
        let err = facade
            .create_place(apartment("does-not-exist"))
            .await
            .unwrap_err();
        assert!(err.is_validation(), "{backend:?}");
        let after: Vec<Uuid> = facade
            .get_all_places()
            .await
            .unwrap()
            .iter()
            .map(Entity::id)
            .collect();
        assert_eq!(before, after, "{backend:?}");
    }
}

#[tokio::test]
async fn test_place_details_expand_references() {
    for backend in BACKENDS {
        let facade = facade(backend).await;
        let owner = facade.create_user(john()).await.unwrap();
        let guest = facade.create_user(jane()).await.unwrap();
        let wifi = facade.create_amenity(amenity("WiFi")).await.unwrap();
        let pool = facade.create_amenity(amenity("Pool")).await.unwrap();
        let place = facade
            .create_place(NewPlace {
                amenities: vec![wifi.id().to_string(), pool.id().to_string()],
                ..apartment(&owner.id().to_string())
            })
            .await
            .unwrap();
        facade
            .create_review(review("Great!", 5, place.id(), guest.id()))
            .await
            .unwrap();

        // Deleted amenities drop out of the view
        assert!(facade.delete_amenity(&pool.id().to_string()).await.unwrap());

        let details = facade
            .get_place_details(&place.id().to_string())
            .await
            .unwrap()
            .unwrap();
        let owner_summary = details.owner.as_ref().unwrap();
        assert_eq!(owner_summary.id, owner.id(), "{backend:?}");
        assert_eq!(owner_summary.email, "john.doe@example.com", "{backend:?}");
        assert_eq!(details.amenities.len(), 1, "{backend:?}");
        assert_eq!(details.amenities[0].name, "WiFi", "{backend:?}");
        assert_eq!(details.reviews.len(), 1, "{backend:?}");
        assert_eq!(details.reviews[0].user_id, guest.id(), "{backend:?}");
        assert_eq!(details.reviews[0].rating, 5, "{backend:?}");

        // List view keeps flat ids
        let record = place.to_record();
        assert_eq!(record["owner_id"], owner.id().to_string(), "{backend:?}");
        assert_eq!(record["amenities"].as_array().map(Vec::len), Some(2));
    }
}

#[tokio::test]
async fn test_reverse_collections() {
    for backend in BACKENDS {
        let facade = facade(backend).await;
        let john = facade.create_user(john()).await.unwrap();
        let jane = facade.create_user(jane()).await.unwrap();
        let loft = facade
            .create_place(NewPlace::new("Loft", john.id().to_string()))
            .await
            .unwrap();
        facade
            .create_place(NewPlace::new("Cabin", jane.id().to_string()))
            .await
            .unwrap();
        facade
            .create_review(review("Cosy", 4, loft.id(), jane.id()))
            .await
            .unwrap();

        let johns = facade
            .get_places_by_owner(&john.id().to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(johns.len(), 1, "{backend:?}");
        assert_eq!(johns[0].id(), loft.id(), "{backend:?}");

        let by_jane = facade
            .get_reviews_by_user(&jane.id().to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_jane.len(), 1, "{backend:?}");
        let by_john = facade
            .get_reviews_by_user(&john.id().to_string())
            .await
            .unwrap()
            .unwrap();
        assert!(by_john.is_empty(), "{backend:?}");
    }
}

#[tokio::test]
async fn test_amenity_update() {
    for backend in BACKENDS {
        let facade = facade(backend).await;
        let wifi = facade.create_amenity(amenity("WiFi")).await.unwrap();
        let id = wifi.id().to_string();

        let err = facade
            .update_amenity(&id, AmenityChanges { name: Some(" ".into()) })
            .await
            .unwrap_err();
        assert!(err.is_validation(), "{backend:?}");

        let renamed = facade
            .update_amenity(&id, AmenityChanges { name: Some("Fast WiFi".into()) })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(renamed.name(), "Fast WiFi", "{backend:?}");
        assert_eq!(
            facade.get_amenity(&id).await.unwrap().unwrap().name(),
            "Fast WiFi",
            "{backend:?}"
        );
        assert!(facade.create_amenity(amenity("")).await.is_err());
    }
}
