//! Credential Adapters
//!
//! PBKDF2-HMAC-SHA256 password hashing and HMAC-SHA256 signed access
//! tokens.

mod password;
mod token;

pub use password::Pbkdf2Hasher;
pub use token::{HmacTokenIssuer, TokenError};

use hmac::{Hmac, Mac};
use sha2::Sha256;

use hbnb::DomainError;

type HmacSha256 = Hmac<Sha256>;

fn keyed_mac(key: &[u8]) -> Result<HmacSha256, DomainError> {
    HmacSha256::new_from_slice(key).map_err(|e| DomainError::ExternalService(e.to_string()))
}
