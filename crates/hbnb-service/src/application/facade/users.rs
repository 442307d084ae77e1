//! User operations

use serde_json::json;
use uuid::Uuid;

use hbnb::{DomainError, Email, Entity, User, UserPatch};

use super::{parse_id, Facade};
use crate::models::{NewUser, UserChanges};

impl Facade {
    /// Register a user; the email must not be taken
    pub async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let _guard = self.writes.lock().await;

        let mut user = User::new(
            input.first_name,
            input.last_name,
            &input.email,
            input.is_admin,
        )?;
        self.ensure_email_available(user.email(), None).await?;

        if let Some(password) = input.password.as_deref() {
            user = user.with_password_hash(self.hash_password(password)?);
        }
        if input.is_test_user {
            user = user.as_test_user();
        }

        let user = self.users.add(user).await?;
        tracing::info!(
            "Created user: {} {} ({})",
            user.first_name(),
            user.last_name(),
            user.id()
        );

        Ok(user)
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<User>, DomainError> {
        match parse_id(id) {
            Some(id) => self.users.get(id).await,
            None => Ok(None),
        }
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.users.get_by_attribute("email", &json!(email)).await
    }

    /// All users except test accounts
    pub async fn get_users(&self) -> Result<Vec<User>, DomainError> {
        let users = self.users.get_all().await?;
        Ok(users.into_iter().filter(|u| !u.is_test_user()).collect())
    }

    pub async fn update_user(
        &self,
        id: &str,
        changes: UserChanges,
    ) -> Result<Option<User>, DomainError> {
        let _guard = self.writes.lock().await;

        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let Some(current) = self.users.get(id).await? else {
            return Ok(None);
        };

        let email = changes.email.as_deref().map(Email::parse).transpose()?;
        if let Some(email) = &email {
            if email.as_str() != current.email().as_str() {
                self.ensure_email_available(email, Some(id)).await?;
            }
        }

        let password_hash = changes
            .password
            .as_deref()
            .map(|password| self.hash_password(password))
            .transpose()?;

        let patch = UserPatch {
            first_name: changes.first_name,
            last_name: changes.last_name,
            email: email.map(|e| e.as_str().to_string()),
            is_admin: changes.is_admin,
            password_hash,
            is_test_user: None,
        };

        let updated = self.users.update(id, patch).await?;
        if updated.is_some() {
            tracing::info!("Updated user: {}", id);
        }
        Ok(updated)
    }

    /// Refused while the user still owns places; authored reviews stay
    pub async fn delete_user(&self, id: &str) -> Result<bool, DomainError> {
        let _guard = self.writes.lock().await;

        let Some(id) = parse_id(id) else {
            return Ok(false);
        };
        if self.users.get(id).await?.is_none() {
            return Ok(false);
        }

        let owned = self
            .places
            .filter_by_attribute("owner_id", &json!(id.to_string()))
            .await?;
        if !owned.is_empty() {
            return Err(DomainError::validation(format!(
                "User with ID {} still owns {} place(s)",
                id,
                owned.len()
            )));
        }

        let deleted = self.users.delete(id).await?;
        if deleted {
            tracing::info!("Deleted user: {}", id);
        }
        Ok(deleted)
    }

    pub(super) async fn ensure_email_available(
        &self,
        email: &Email,
        except: Option<Uuid>,
    ) -> Result<(), DomainError> {
        let holders = self
            .users
            .filter_by_attribute("email", &json!(email.as_str()))
            .await?;

        if holders.iter().any(|u| Some(u.id()) != except) {
            return Err(DomainError::validation("Email already registered"));
        }
        Ok(())
    }

    pub(super) fn hash_password(&self, password: &str) -> Result<String, DomainError> {
        if password.is_empty() {
            return Err(DomainError::validation("Password cannot be empty"));
        }
        self.hasher.hash(password)
    }
}
