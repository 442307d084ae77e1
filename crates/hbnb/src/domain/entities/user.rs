//! User - account that owns places and authors reviews
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::Entity;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{require_text, Email};

const NAME_MAX_CHARS: usize = 50;

/// User account. The password is only ever held as a salted hash.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: Email,
    is_admin: bool,
    #[serde(skip)]
    password_hash: Option<String>,
    /// Internal/seeded account hidden from user listings
    #[serde(skip)]
    is_test_user: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Partial update for a User; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub is_admin: Option<bool>,
    pub password_hash: Option<String>,
    pub is_test_user: Option<bool>,
}

/// Field values as persisted by a storage backend
#[derive(Debug, Clone)]
pub struct StoredUser {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
    pub password_hash: Option<String>,
    pub is_test_user: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with generated ID and timestamps
    pub fn new(
        first_name: String,
        last_name: String,
        email: &str,
        is_admin: bool,
    ) -> Result<Self, DomainError> {
        Self::validate_first_name(&first_name)?;
        Self::validate_last_name(&last_name)?;
        let email = Email::parse(email)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            first_name,
            last_name,
            email,
            is_admin,
            password_hash: None,
            is_test_user: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild a User from storage, re-checking every invariant
    pub fn restore(stored: StoredUser) -> Result<Self, DomainError> {
        Self::validate_first_name(&stored.first_name)?;
        Self::validate_last_name(&stored.last_name)?;
        Ok(Self {
            id: stored.id,
            first_name: stored.first_name,
            last_name: stored.last_name,
            email: Email::parse(stored.email)?,
            is_admin: stored.is_admin,
            password_hash: stored.password_hash,
            is_test_user: stored.is_test_user,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        })
    }

    pub fn with_password_hash(mut self, password_hash: String) -> Self {
        self.password_hash = Some(password_hash);
        self
    }

    pub fn as_test_user(mut self) -> Self {
        self.is_test_user = true;
        self
    }

    pub fn validate_first_name(value: &str) -> Result<(), DomainError> {
        require_text("First name", value, NAME_MAX_CHARS)
    }

    pub fn validate_last_name(value: &str) -> Result<(), DomainError> {
        require_text("Last name", value, NAME_MAX_CHARS)
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }

    pub fn is_test_user(&self) -> bool {
        self.is_test_user
    }

    fn set_first_name(&mut self, value: String) -> Result<(), DomainError> {
        Self::validate_first_name(&value)?;
        self.first_name = value;
        Ok(())
    }

    fn set_last_name(&mut self, value: String) -> Result<(), DomainError> {
        Self::validate_last_name(&value)?;
        self.last_name = value;
        Ok(())
    }

    fn set_email(&mut self, value: &str) -> Result<(), DomainError> {
        self.email = Email::parse(value)?;
        Ok(())
    }
}

impl Entity for User {
    type Patch = UserPatch;

    const KIND: &'static str = "User";
    const ATTRIBUTES: &'static [&'static str] =
        &["id", "first_name", "last_name", "email", "is_admin"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn apply(&mut self, patch: UserPatch) -> Result<(), DomainError> {
        let mut next = self.clone();
        if let Some(first_name) = patch.first_name {
            next.set_first_name(first_name)?;
        }
        if let Some(last_name) = patch.last_name {
            next.set_last_name(last_name)?;
        }
        if let Some(email) = patch.email {
            next.set_email(&email)?;
        }
        if let Some(is_admin) = patch.is_admin {
            next.is_admin = is_admin;
        }
        if let Some(password_hash) = patch.password_hash {
            next.password_hash = Some(password_hash);
        }
        if let Some(is_test_user) = patch.is_test_user {
            next.is_test_user = is_test_user;
        }
        next.updated_at = Utc::now();
        *self = next;
        Ok(())
    }
}
