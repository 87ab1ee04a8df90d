use std::sync::Arc;

use service::lists::ListService;
use service::storage::{KvStore, MemoryKvStore};

/// Shared handler state: the one list service owning the store.
#[derive(Clone)]
pub struct ServerState {
    pub lists: Arc<ListService<dyn KvStore>>,
}

impl ServerState {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self::from_service(ListService::new(store))
    }

    pub fn from_service(lists: ListService<dyn KvStore>) -> Self {
        Self { lists: Arc::new(lists) }
    }

    /// State over a fresh process-local store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryKvStore::new()))
    }
}
