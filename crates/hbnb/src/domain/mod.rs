//! Domain Layer
//!
//! Pure domain logic without infrastructure dependencies.
//! Contains entities, value objects, read views, and errors.

pub mod entities;
pub mod errors;
pub mod value_objects;
pub mod views;

// Re-exports for convenience
pub use entities::*;
pub use errors::*;
pub use value_objects::*;
pub use views::*;
