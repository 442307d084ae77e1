//! Password Hasher Port
//!
//! Plaintext passwords only ever pass through this interface.

use crate::domain::errors::DomainError;

/// Service interface for salted password hashing
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted hash for storage
    fn hash(&self, plaintext: &str) -> Result<String, DomainError>;

    /// Check a plaintext candidate against a stored hash
    fn verify(&self, plaintext: &str, hash: &str) -> bool;
}
