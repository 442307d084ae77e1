//! Signed bearer tokens: `hex(payload).hex(hmac-sha256(secret, payload))`

use chrono::{DateTime, Duration, TimeZone, Utc};
use hmac::Mac;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use hbnb::{AccessToken, DomainError, TokenClaims, TokenIssuer};

use super::keyed_mac;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,

    #[error("Invalid token signature")]
    BadSignature,

    #[error("Token expired at {0}")]
    Expired(DateTime<Utc>),
}

#[derive(Serialize, Deserialize)]
struct Payload {
    sub: Uuid,
    adm: bool,
    exp: i64,
}

pub struct HmacTokenIssuer {
    secret: Vec<u8>,
    ttl: Duration,
}

impl HmacTokenIssuer {
    pub fn new(secret: impl Into<Vec<u8>>, ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            ttl,
        }
    }

    fn sign(&self, payload: &[u8]) -> Result<Vec<u8>, DomainError> {
        let mut mac = keyed_mac(&self.secret)?;
        mac.update(payload);
        Ok(mac.finalize().into_bytes().to_vec())
    }

    pub fn issue_at(
        &self,
        claims: &TokenClaims,
        now: DateTime<Utc>,
    ) -> Result<AccessToken, DomainError> {
        let expires_at = now.checked_add_signed(self.ttl).ok_or_else(|| {
            DomainError::ExternalService("token expiry is out of range".to_string())
        })?;
        let payload = serde_json::to_vec(&Payload {
            sub: claims.user_id,
            adm: claims.is_admin,
            exp: expires_at.timestamp(),
        })
        .map_err(|e| DomainError::ExternalService(e.to_string()))?;

        let signature = self.sign(&payload)?;

        Ok(AccessToken {
            access_token: format!("{}.{}", hex::encode(&payload), hex::encode(signature)),
            expires_at,
        })
    }

    /// Check signature and expiry against the current time
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
        let (payload_hex, signature_hex) = token.split_once('.').ok_or(TokenError::Malformed)?;
        let payload = hex::decode(payload_hex).map_err(|_| TokenError::Malformed)?;
        let signature = hex::decode(signature_hex).map_err(|_| TokenError::Malformed)?;

        let mut mac = keyed_mac(&self.secret).map_err(|_| TokenError::BadSignature)?;
        mac.update(&payload);
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::BadSignature)?;

        let payload: Payload =
            serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;
        let expires_at = Utc
            .timestamp_opt(payload.exp, 0)
            .single()
            .ok_or(TokenError::Malformed)?;
        if now >= expires_at {
            return Err(TokenError::Expired(expires_at));
        }

        Ok(TokenClaims {
            user_id: payload.sub,
            is_admin: payload.adm,
        })
    }
}

impl TokenIssuer for HmacTokenIssuer {
    fn issue(&self, claims: &TokenClaims) -> Result<AccessToken, DomainError> {
        self.issue_at(claims, Utc::now())
    }
}
