//! SQLite implementation of Repository<User>

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::SqlitePool;
use uuid::Uuid;

use hbnb::{validate_attribute_query, DomainError, Entity, Repository, StoredUser, User, UserPatch};

use super::attribute::{fetch_matching, keep_exact};
use super::parse_uuid;

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    first_name: String,
    last_name: String,
    email: String,
    is_admin: bool,
    password_hash: Option<String>,
    is_test_user: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        User::restore(StoredUser {
            id: parse_uuid(&row.id)?,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            is_admin: row.is_admin,
            password_hash: row.password_hash,
            is_test_user: row.is_test_user,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_users(rows: Vec<UserRow>) -> Result<Vec<User>, DomainError> {
    rows.into_iter().map(User::try_from).collect()
}

#[async_trait]
impl Repository<User> for SqliteUserRepository {
    async fn add(&self, user: User) -> Result<User, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users
                (id, first_name, last_name, email, is_admin, password_hash, is_test_user, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id().to_string())
        .bind(user.first_name())
        .bind(user.last_name())
        .bind(user.email().as_str())
        .bind(user.is_admin())
        .bind(user.password_hash())
        .bind(user.is_test_user())
        .bind(user.created_at())
        .bind(user.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        tracing::debug!("Inserted user {}", user.id());
        Ok(user)
    }

    async fn get(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn get_all(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query_as::<_, UserRow>("SELECT * FROM users ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        into_users(rows)
    }

    async fn update(&self, id: Uuid, patch: UserPatch) -> Result<Option<User>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut user = User::try_from(row)?;
        user.apply(patch)?;

        sqlx::query(
            r#"
            UPDATE users
            SET first_name = ?, last_name = ?, email = ?, is_admin = ?, password_hash = ?,
                is_test_user = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(user.first_name())
        .bind(user.last_name())
        .bind(user.email().as_str())
        .bind(user.is_admin())
        .bind(user.password_hash())
        .bind(user.is_test_user())
        .bind(user.updated_at())
        .bind(id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        tracing::debug!("Updated user {}", id);
        Ok(Some(user))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn filter_by_attribute(
        &self,
        name: &str,
        value: &Value,
    ) -> Result<Vec<User>, DomainError> {
        validate_attribute_query::<User>(name, value)?;

        let rows = fetch_matching::<UserRow>(&self.pool, "users", name, value).await?;
        Ok(keep_exact(into_users(rows)?, name, value))
    }
}
