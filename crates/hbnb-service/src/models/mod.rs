//! HBnB Input Models
//!
//! Caller-supplied payloads for facade operations. Ids arrive as strings
//! and are resolved by the facade.

mod amenity;
mod place;
mod review;
mod user;

pub use amenity::*;
pub use place::*;
pub use review::*;
pub use user::*;
