//! PBKDF2-HMAC-SHA256 password hashing
//!
//! Stored form: `pbkdf2-sha256$<rounds>$<salt hex>$<digest hex>`

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use hbnb::{DomainError, PasswordHasher};

const SCHEME: &str = "pbkdf2-sha256";
const SALT_LEN: usize = 16;
const DIGEST_LEN: usize = 32;
const DEFAULT_ROUNDS: u32 = 100_000;
/// Stored hashes above this round count are refused rather than computed
const MAX_ROUNDS: u32 = 1_000_000;

#[derive(Debug, Clone)]
pub struct Pbkdf2Hasher {
    rounds: u32,
}

impl Pbkdf2Hasher {
    pub fn new() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
        }
    }

    /// Cheaper hashing for tests; clamped to `1..=MAX_ROUNDS`
    pub fn with_rounds(rounds: u32) -> Self {
        Self {
            rounds: rounds.clamp(1, MAX_ROUNDS),
        }
    }
}

impl Default for Pbkdf2Hasher {
    fn default() -> Self {
        Self::new()
    }
}

fn derive(plaintext: &str, salt: &[u8], rounds: u32) -> [u8; DIGEST_LEN] {
    let mut digest = [0u8; DIGEST_LEN];
    pbkdf2_hmac::<Sha256>(plaintext.as_bytes(), salt, rounds, &mut digest);
    digest
}

struct ParsedHash {
    rounds: u32,
    salt: Vec<u8>,
    digest: Vec<u8>,
}

fn parse(hash: &str) -> Option<ParsedHash> {
    let mut parts = hash.split('$');
    if parts.next()? != SCHEME {
        return None;
    }
    let rounds = parts
        .next()?
        .parse::<u32>()
        .ok()
        .filter(|r| (1..=MAX_ROUNDS).contains(r))?;
    let salt = hex::decode(parts.next()?).ok()?;
    let digest = hex::decode(parts.next()?)
        .ok()
        .filter(|d| d.len() == DIGEST_LEN)?;
    if parts.next().is_some() {
        return None;
    }
    Some(ParsedHash {
        rounds,
        salt,
        digest,
    })
}

impl PasswordHasher for Pbkdf2Hasher {
    fn hash(&self, plaintext: &str) -> Result<String, DomainError> {
        let salt: [u8; SALT_LEN] = rand::random();
        let digest = derive(plaintext, &salt, self.rounds);

        Ok(format!(
            "{}${}${}${}",
            SCHEME,
            self.rounds,
            hex::encode(salt),
            hex::encode(digest)
        ))
    }

    fn verify(&self, plaintext: &str, hash: &str) -> bool {
        let Some(parsed) = parse(hash) else {
            return false;
        };
        let digest = derive(plaintext, &parsed.salt, parsed.rounds);
        digest.as_slice().ct_eq(parsed.digest.as_slice()).into()
    }
}
