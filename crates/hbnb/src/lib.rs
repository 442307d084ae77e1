//! HBnB Domain Library
//!
//! Core domain types and interfaces for the HBnB rental listing backend.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Self-validating models (User, Place, Amenity, Review)
//!   - `value_objects/`: Immutable value types (Email, Rating, TokenClaims)
//!   - `views/`: Expanded read models (PlaceDetails)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interface shared by all entities
//!   - `services/`: Password hashing and token issuance
//!
//! # Usage
//!
//! ```rust,ignore
//! use hbnb::domain::{User, Place};
//! use hbnb::ports::{Repository, PasswordHasher};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    AccessToken, Amenity, AmenityPatch, AmenitySummary, DomainError, Email, Entity,
    OwnerSummary, Place, PlaceDetails, PlacePatch, Rating, Review, ReviewPatch, ReviewSummary,
    StoredAmenity, StoredPlace, StoredReview, StoredUser, TokenClaims, User, UserPatch,
};
pub use ports::{
    attribute_matches, validate_attribute_query, PasswordHasher, Repository, TokenIssuer,
};
