//! Service layer for the list store.
//! - Validates submitted lists and owns key allocation (`lists`).
//! - Hides where serialized lists live behind `storage::KvStore`.
//! - Provides clear error types (`errors`).

pub mod errors;
pub mod lists;
pub mod storage;
