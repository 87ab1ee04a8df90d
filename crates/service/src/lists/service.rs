use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::errors::ServiceError;
use crate::lists::domain::{extract_new_item, ListKey};
use crate::storage::KvStore;

/// Application service owning the list key space.
///
/// Keys come from an atomic counter rather than the store's current size,
/// so concurrent submissions never land on the same key.
pub struct ListService<S: KvStore + ?Sized> {
    store: Arc<S>,
    next_key: AtomicU64,
}

impl<S: KvStore + ?Sized> ListService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store, next_key: AtomicU64::new(0) }
    }

    /// Build a service over a store that may already hold entries; new keys
    /// start after the highest existing one.
    pub async fn resume(store: Arc<S>) -> Result<Self, ServiceError> {
        let existing = store.len().await?;
        let next = store.keys().await?.into_iter().max().map_or(0, |k| k + 1);
        info!(existing, next_key = next, "resuming list store");
        Ok(Self { store, next_key: AtomicU64::new(next) })
    }

    /// Drop every stored list and restart key allocation. Startup only.
    pub async fn reset(&self) -> Result<(), ServiceError> {
        self.store.flush_all().await?;
        self.next_key.store(0, Ordering::SeqCst);
        info!("list store flushed");
        Ok(())
    }

    /// Validate `new_item` in `body` and store it under a fresh key.
    #[instrument(skip_all)]
    pub async fn submit(&self, body: &Value) -> Result<ListKey, ServiceError> {
        let items = extract_new_item(body)?;
        let encoded = serde_json::to_string(items)
            .map_err(|e| ServiceError::Store(format!("encode list: {e}")))?;
        let key = self.next_key.fetch_add(1, Ordering::SeqCst);
        self.store.set(key, encoded).await?;
        debug!(key, len = items.len(), "list stored");
        Ok(key)
    }

    /// Every stored list, decoded, ordered by key.
    pub async fn list_all(&self) -> Result<Vec<Value>, ServiceError> {
        let mut keys = self.store.keys().await?;
        keys.sort_unstable();

        let mut lists = Vec::with_capacity(keys.len());
        for key in keys {
            let Some(raw) = self.store.get(key).await? else {
                // removed between keys() and get()
                warn!(key, "stored list vanished during read");
                continue;
            };
            let list = serde_json::from_str::<Value>(&raw)
                .map_err(|e| ServiceError::Corrupt { key, reason: e.to_string() })?;
            lists.push(list);
        }
        debug!(count = lists.len(), "lists read");
        Ok(lists)
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }
}
