//! SQLite implementation of Repository<Review>

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::SqlitePool;
use uuid::Uuid;

use hbnb::{
    validate_attribute_query, DomainError, Entity, Repository, Review, ReviewPatch, StoredReview,
};

use super::attribute::{fetch_matching, keep_exact};
use super::parse_uuid;

pub struct SqliteReviewRepository {
    pool: SqlitePool,
}

impl SqliteReviewRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    id: String,
    text: String,
    rating: i64,
    place_id: String,
    user_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ReviewRow> for Review {
    type Error = DomainError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        Review::restore(StoredReview {
            id: parse_uuid(&row.id)?,
            text: row.text,
            rating: row.rating,
            place_id: parse_uuid(&row.place_id)?,
            user_id: parse_uuid(&row.user_id)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_reviews(rows: Vec<ReviewRow>) -> Result<Vec<Review>, DomainError> {
    rows.into_iter().map(Review::try_from).collect()
}

#[async_trait]
impl Repository<Review> for SqliteReviewRepository {
    async fn add(&self, review: Review) -> Result<Review, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO reviews (id, text, rating, place_id, user_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(review.id().to_string())
        .bind(review.text())
        .bind(i64::from(review.rating().value()))
        .bind(review.place_id().to_string())
        .bind(review.user_id().to_string())
        .bind(review.created_at())
        .bind(review.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        tracing::debug!("Inserted review {}", review.id());
        Ok(review)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Review>, DomainError> {
        let row = sqlx::query_as::<_, ReviewRow>("SELECT * FROM reviews WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.map(Review::try_from).transpose()
    }

    async fn get_all(&self) -> Result<Vec<Review>, DomainError> {
        let rows = sqlx::query_as::<_, ReviewRow>("SELECT * FROM reviews ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        into_reviews(rows)
    }

    async fn update(&self, id: Uuid, patch: ReviewPatch) -> Result<Option<Review>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        let row = sqlx::query_as::<_, ReviewRow>("SELECT * FROM reviews WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut review = Review::try_from(row)?;
        review.apply(patch)?;

        // place_id and user_id are immutable
        sqlx::query("UPDATE reviews SET text = ?, rating = ?, updated_at = ? WHERE id = ?")
            .bind(review.text())
            .bind(i64::from(review.rating().value()))
            .bind(review.updated_at())
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        tracing::debug!("Updated review {}", id);
        Ok(Some(review))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = ?")
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
    ) -> Result<Vec<Review>, DomainError> {
        validate_attribute_query::<Review>(name, value)?;

        let rows = fetch_matching::<ReviewRow>(&self.pool, "reviews", name, value).await?;
        Ok(keep_exact(into_reviews(rows)?, name, value))
    }
}
