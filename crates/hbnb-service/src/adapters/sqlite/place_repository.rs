//! SQLite implementation of Repository<Place>
//!
//! Amenity references live in `place_amenities`, ordered by `position`.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use hbnb::{
    validate_attribute_query, DomainError, Entity, Place, PlacePatch, Repository, StoredPlace,
};

use super::attribute::{fetch_matching, keep_exact};
use super::parse_uuid;

/// Place ids bound per link query, below SQLite's host parameter limit
const LINK_BATCH: usize = 500;

pub struct SqlitePlaceRepository {
    pool: SqlitePool,
}

impl SqlitePlaceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn with_amenities(&self, rows: Vec<PlaceRow>) -> Result<Vec<Place>, DomainError> {
        let place_ids: Vec<&str> = rows.iter().map(|row| row.id.as_str()).collect();
        let mut links = load_amenity_links(&self.pool, &place_ids).await?;

        rows.into_iter()
            .map(|row| {
                let amenities = links.remove(&row.id).unwrap_or_default();
                row.into_place(amenities)
            })
            .collect()
    }
}

#[derive(sqlx::FromRow)]
struct PlaceRow {
    id: String,
    title: String,
    description: String,
    price: f64,
    latitude: f64,
    longitude: f64,
    owner_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PlaceRow {
    fn into_place(self, amenities: Vec<Uuid>) -> Result<Place, DomainError> {
        Place::restore(StoredPlace {
            id: parse_uuid(&self.id)?,
            title: self.title,
            description: self.description,
            price: self.price,
            latitude: self.latitude,
            longitude: self.longitude,
            owner_id: parse_uuid(&self.owner_id)?,
            amenities,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

async fn load_amenity_ids<'e, X>(executor: X, place_id: &str) -> Result<Vec<Uuid>, DomainError>
where
    X: sqlx::Executor<'e, Database = Sqlite>,
{
    let ids = sqlx::query_scalar::<_, String>(
        "SELECT amenity_id FROM place_amenities WHERE place_id = ? ORDER BY position",
    )
    .bind(place_id)
    .fetch_all(executor)
    .await
    .map_err(|e| DomainError::Repository(e.to_string()))?;

    ids.iter().map(|id| parse_uuid(id)).collect()
}

/// Amenity ids for many places, one query per `LINK_BATCH` ids
async fn load_amenity_links(
    pool: &SqlitePool,
    place_ids: &[&str],
) -> Result<HashMap<String, Vec<Uuid>>, DomainError> {
    let mut links: HashMap<String, Vec<Uuid>> = HashMap::new();

    for chunk in place_ids.chunks(LINK_BATCH) {
        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT place_id, amenity_id FROM place_amenities WHERE place_id IN (",
        );
        let mut bound = query.separated(", ");
        for place_id in chunk {
            bound.push_bind(*place_id);
        }
        query.push(") ORDER BY place_id, position");

        let pairs = query
            .build_query_as::<(String, String)>()
            .fetch_all(pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        for (place_id, amenity_id) in pairs {
            links
                .entry(place_id)
                .or_default()
                .push(parse_uuid(&amenity_id)?);
        }
    }

    Ok(links)
}

async fn store_amenity_ids(
    conn: &mut sqlx::SqliteConnection,
    place: &Place,
) -> Result<(), DomainError> {
    let place_id = place.id().to_string();

    sqlx::query("DELETE FROM place_amenities WHERE place_id = ?")
        .bind(&place_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

    for (position, amenity_id) in place.amenities().iter().enumerate() {
        sqlx::query("INSERT INTO place_amenities (place_id, amenity_id, position) VALUES (?, ?, ?)")
            .bind(&place_id)
            .bind(amenity_id.to_string())
            .bind(position as i64)
            .execute(&mut *conn)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;
    }

    Ok(())
}

#[async_trait]
impl Repository<Place> for SqlitePlaceRepository {
    async fn add(&self, place: Place) -> Result<Place, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO places
                (id, title, description, price, latitude, longitude, owner_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(place.id().to_string())
        .bind(place.title())
        .bind(place.description())
        .bind(place.price())
        .bind(place.latitude())
        .bind(place.longitude())
        .bind(place.owner_id().to_string())
        .bind(place.created_at())
        .bind(place.updated_at())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        store_amenity_ids(&mut *tx, &place).await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        tracing::debug!("Inserted place {}", place.id());
        Ok(place)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Place>, DomainError> {
        let row = sqlx::query_as::<_, PlaceRow>("SELECT * FROM places WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        match row {
            Some(row) => Ok(self.with_amenities(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn get_all(&self) -> Result<Vec<Place>, DomainError> {
        let rows = sqlx::query_as::<_, PlaceRow>("SELECT * FROM places ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        self.with_amenities(rows).await
    }

    async fn update(&self, id: Uuid, patch: PlacePatch) -> Result<Option<Place>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        let row = sqlx::query_as::<_, PlaceRow>("SELECT * FROM places WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let amenities = load_amenity_ids(&mut *tx, &row.id).await?;
        let mut place = row.into_place(amenities)?;
        place.apply(patch)?;

        sqlx::query(
            r#"
            UPDATE places
            SET title = ?, description = ?, price = ?, latitude = ?, longitude = ?,
                owner_id = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(place.title())
        .bind(place.description())
        .bind(place.price())
        .bind(place.latitude())
        .bind(place.longitude())
        .bind(place.owner_id().to_string())
        .bind(place.updated_at())
        .bind(id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        store_amenity_ids(&mut *tx, &place).await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        tracing::debug!("Updated place {}", id);
        Ok(Some(place))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        sqlx::query("DELETE FROM place_amenities WHERE place_id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        let result = sqlx::query("DELETE FROM places WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn filter_by_attribute(
        &self,
        name: &str,
        value: &Value,
    ) -> Result<Vec<Place>, DomainError> {
        validate_attribute_query::<Place>(name, value)?;

        let rows = fetch_matching::<PlaceRow>(&self.pool, "places", name, value).await?;
        Ok(keep_exact(self.with_amenities(rows).await?, name, value))
    }
}
