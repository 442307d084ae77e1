//! SQLite implementation of Repository<Amenity>

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::SqlitePool;
use uuid::Uuid;

use hbnb::{
    validate_attribute_query, Amenity, AmenityPatch, DomainError, Entity, Repository,
    StoredAmenity,
};

use super::attribute::{fetch_matching, keep_exact};
use super::parse_uuid;

pub struct SqliteAmenityRepository {
    pool: SqlitePool,
}

impl SqliteAmenityRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AmenityRow {
    id: String,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AmenityRow> for Amenity {
    type Error = DomainError;

    fn try_from(row: AmenityRow) -> Result<Self, Self::Error> {
        Amenity::restore(StoredAmenity {
            id: parse_uuid(&row.id)?,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_amenities(rows: Vec<AmenityRow>) -> Result<Vec<Amenity>, DomainError> {
    rows.into_iter().map(Amenity::try_from).collect()
}

#[async_trait]
impl Repository<Amenity> for SqliteAmenityRepository {
    async fn add(&self, amenity: Amenity) -> Result<Amenity, DomainError> {
        sqlx::query("INSERT INTO amenities (id, name, created_at, updated_at) VALUES (?, ?, ?, ?)")
            .bind(amenity.id().to_string())
            .bind(amenity.name())
            .bind(amenity.created_at())
            .bind(amenity.updated_at())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        tracing::debug!("Inserted amenity {}", amenity.id());
        Ok(amenity)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Amenity>, DomainError> {
        let row = sqlx::query_as::<_, AmenityRow>("SELECT * FROM amenities WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.map(Amenity::try_from).transpose()
    }

    async fn get_all(&self) -> Result<Vec<Amenity>, DomainError> {
        let rows =
            sqlx::query_as::<_, AmenityRow>("SELECT * FROM amenities ORDER BY created_at, id")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| DomainError::Repository(e.to_string()))?;

        into_amenities(rows)
    }

    async fn update(&self, id: Uuid, patch: AmenityPatch) -> Result<Option<Amenity>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        let row = sqlx::query_as::<_, AmenityRow>("SELECT * FROM amenities WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut amenity = Amenity::try_from(row)?;
        amenity.apply(patch)?;

        sqlx::query("UPDATE amenities SET name = ?, updated_at = ? WHERE id = ?")
            .bind(amenity.name())
            .bind(amenity.updated_at())
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        tracing::debug!("Updated amenity {}", id);
        Ok(Some(amenity))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM amenities WHERE id = ?")
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
    ) -> Result<Vec<Amenity>, DomainError> {
        validate_attribute_query::<Amenity>(name, value)?;

        let rows = fetch_matching::<AmenityRow>(&self.pool, "amenities", name, value).await?;
        Ok(keep_exact(into_amenities(rows)?, name, value))
    }
}
