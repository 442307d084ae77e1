//! Generic in-memory implementation of Repository

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use hbnb::{attribute_matches, validate_attribute_query, DomainError, Entity, Repository};

/// Keyed map of entities; lives as long as the process
pub struct InMemoryRepository<E: Entity> {
    storage: RwLock<HashMap<Uuid, E>>,
}

impl<E: Entity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            storage: RwLock::new(HashMap::new()),
        }
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Same order the SQL backend uses: creation time, then id
fn in_storage_order<E: Entity>(mut entities: Vec<E>) -> Vec<E> {
    entities.sort_by(|a, b| {
        a.created_at()
            .cmp(&b.created_at())
            .then_with(|| a.id().cmp(&b.id()))
    });
    entities
}

#[async_trait]
impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    async fn add(&self, entity: E) -> Result<E, DomainError> {
        self.storage
            .write()
            .await
            .insert(entity.id(), entity.clone());
        tracing::debug!("Stored {} {}", E::KIND, entity.id());
        Ok(entity)
    }

    async fn get(&self, id: Uuid) -> Result<Option<E>, DomainError> {
        Ok(self.storage.read().await.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<E>, DomainError> {
        let entities = self.storage.read().await.values().cloned().collect();
        Ok(in_storage_order(entities))
    }

    async fn update(&self, id: Uuid, patch: E::Patch) -> Result<Option<E>, DomainError> {
        let mut storage = self.storage.write().await;
        let Some(entity) = storage.get_mut(&id) else {
            return Ok(None);
        };

        entity.apply(patch)?;
        tracing::debug!("Updated {} {}", E::KIND, id);
        Ok(Some(entity.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.storage.write().await.remove(&id).is_some())
    }

    async fn filter_by_attribute(
        &self,
        name: &str,
        value: &Value,
    ) -> Result<Vec<E>, DomainError> {
        validate_attribute_query::<E>(name, value)?;

        let matches = self
            .storage
            .read()
            .await
            .values()
            .filter(|entity| {
                entity
                    .attribute(name)
                    .is_some_and(|stored| attribute_matches(&stored, value))
            })
            .cloned()
            .collect();

        Ok(in_storage_order(matches))
    }
}
