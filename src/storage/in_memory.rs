//! In-memory implementation of Loader for testing and development

use crate::core::filter::{self, Filter};
use crate::core::{Entity, Loader};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory loader implementation
///
/// Keeps entities in insertion order and pages over the ones matching both the
/// `where` filter and the `extendedfilter` (see [`crate::core::filter`] for the
/// filter conventions). Uses RwLock for thread-safe access.
#[derive(Clone)]
pub struct InMemoryLoader<T: Entity> {
    items: Arc<RwLock<IndexMap<Uuid, T>>>,
}

impl<T: Entity> InMemoryLoader<T> {
    /// Create a new empty in-memory loader
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Create a loader holding `items`
    pub fn with_items(items: impl IntoIterator<Item = T>) -> Result<Self> {
        let loader = Self::new();
        for item in items {
            loader.insert(item)?;
        }
        Ok(loader)
    }

    /// Insert or replace an entity
    pub fn insert(&self, item: T) -> Result<()> {
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        items.insert(item.id(), item);

        Ok(())
    }

    /// Remove an entity, returning it if it was present
    pub fn remove(&self, id: &Uuid) -> Result<Option<T>> {
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(items.shift_remove(id))
    }

    /// Number of stored entities
    pub fn len(&self) -> Result<usize> {
        let items = self
            .items
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(items.len())
    }

    /// Wrap into a shared trait object
    pub fn shared(self) -> Arc<dyn Loader<T>> {
        Arc::new(self)
    }
}

impl<T: Entity> Default for InMemoryLoader<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn entity_matches<T: Entity>(entity: &T, filter: &Filter) -> bool {
    filter::matches(filter, &|field: &str| {
        entity.attribute(field).map(|value| value.to_json())
    })
}

#[async_trait]
impl<T: Entity> Loader<T> for InMemoryLoader<T> {
    async fn page(
        &self,
        skip: i64,
        limit: i64,
        where_: Option<Filter>,
        extendedfilter: Option<Filter>,
    ) -> Result<Vec<T>> {
        let items = self
            .items
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let skip = usize::try_from(skip).unwrap_or(0);
        let limit = usize::try_from(limit).unwrap_or(0);

        let combined = filter::merge(where_, extendedfilter);

        Ok(items
            .values()
            .filter(|item| combined.as_ref().is_none_or(|f| entity_matches(*item, f)))
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn load(&self, id: Uuid) -> Result<Option<T>> {
        let items = self
            .items
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(items.get(&id).cloned())
    }
}
