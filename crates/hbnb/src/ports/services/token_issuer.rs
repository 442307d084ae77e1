//! Token Issuer Port
//!
//! Issues bearer credentials for authenticated users. The domain only
//! supplies the claims; it never validates tokens.

use crate::domain::{errors::DomainError, AccessToken, TokenClaims};

/// Service interface for access token issuance
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, claims: &TokenClaims) -> Result<AccessToken, DomainError>;
}
