use async_trait::async_trait;
use dashmap::DashMap;

use crate::errors::ServiceError;
use crate::lists::domain::ListKey;
use crate::storage::kv_store::KvStore;

/// Process-local key-value store backed by a sharded concurrent map.
///
/// Contents live only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    inner: DashMap<ListKey, String>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn flush_all(&self) -> Result<(), ServiceError> {
        self.inner.clear();
        Ok(())
    }

    async fn set(&self, key: ListKey, value: String) -> Result<(), ServiceError> {
        self.inner.insert(key, value);
        Ok(())
    }

    async fn get(&self, key: ListKey) -> Result<Option<String>, ServiceError> {
        Ok(self.inner.get(&key).map(|v| v.value().clone()))
    }

    async fn keys(&self) -> Result<Vec<ListKey>, ServiceError> {
        Ok(self.inner.iter().map(|e| *e.key()).collect())
    }

    async fn len(&self) -> Result<usize, ServiceError> {
        Ok(self.inner.len())
    }
}
