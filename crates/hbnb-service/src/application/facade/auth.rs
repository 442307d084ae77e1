//! Login and administrator provisioning

use hbnb::{AccessToken, DomainError, Entity, TokenClaims, User, UserPatch};

use super::Facade;
use crate::models::NewAdmin;

impl Facade {
    /// Exchange credentials for an access token.
    ///
    /// Unknown email, missing password and wrong password all give `Ok(None)`.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<AccessToken>, DomainError> {
        let Some(user) = self.get_user_by_email(email).await? else {
            tracing::warn!("Rejected login: unknown account");
            return Ok(None);
        };

        let verified = user
            .password_hash()
            .is_some_and(|hash| self.hasher.verify(password, hash));
        if !verified {
            tracing::warn!("Rejected login for user {}", user.id());
            return Ok(None);
        }

        let token = self.tokens.issue(&TokenClaims {
            user_id: user.id(),
            is_admin: user.is_admin(),
        })?;
        tracing::info!("User {} logged in", user.id());

        Ok(Some(token))
    }

    /// Create the administrator account, or promote and reset the account
    /// already registered under the same email. A promoted account stops
    /// being a test user so it shows up in `get_users`.
    pub async fn provision_admin(&self, input: NewAdmin) -> Result<User, DomainError> {
        let _guard = self.writes.lock().await;

        let candidate = User::new(input.first_name, input.last_name, &input.email, true)?;
        let password_hash = self.hash_password(&input.password)?;

        let existing = self.get_user_by_email(candidate.email().as_str()).await?;
        let admin = match existing {
            Some(existing) => {
                let patch = UserPatch {
                    first_name: Some(candidate.first_name().to_string()),
                    last_name: Some(candidate.last_name().to_string()),
                    is_admin: Some(true),
                    password_hash: Some(password_hash),
                    is_test_user: Some(false),
                    ..Default::default()
                };
                let admin = self.users.update(existing.id(), patch).await?.ok_or_else(|| {
                    DomainError::Repository(format!("User {} vanished during update", existing.id()))
                })?;
                tracing::info!("Promoted existing user {} to administrator", admin.id());
                admin
            }
            None => {
                let admin = self
                    .users
                    .add(candidate.with_password_hash(password_hash))
                    .await?;
                tracing::info!("Created administrator {}", admin.id());
                admin
            }
        };

        Ok(admin)
    }
}
