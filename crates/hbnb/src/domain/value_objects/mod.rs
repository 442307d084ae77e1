//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod credentials;
mod email;
mod rating;
mod text;

pub use credentials::*;
pub use email::*;
pub use rating::*;
pub use text::*;
