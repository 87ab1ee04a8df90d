use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::lists::domain::ListKey;

/// Key-value store holding serialized lists.
/// Implementations can be process-local or a remote KV server.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Remove every entry.
    async fn flush_all(&self) -> Result<(), ServiceError>;
    /// Insert or overwrite the value under `key`.
    async fn set(&self, key: ListKey, value: String) -> Result<(), ServiceError>;
    async fn get(&self, key: ListKey) -> Result<Option<String>, ServiceError>;
    /// All keys currently present, in the store's own iteration order.
    async fn keys(&self) -> Result<Vec<ListKey>, ServiceError>;
    async fn len(&self) -> Result<usize, ServiceError>;
}
