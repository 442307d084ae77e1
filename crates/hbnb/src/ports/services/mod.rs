//! Service Ports
//!
//! Abstract interfaces for external services.

mod password_hasher;
mod token_issuer;

pub use password_hasher::*;
pub use token_issuer::*;
