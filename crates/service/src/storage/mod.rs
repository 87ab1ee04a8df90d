//! Storage abstractions for service layer
//!
//! `KvStore` is the seam between list handling and wherever the serialized
//! lists actually live. Only the process-local map ships today.

pub mod kv_store;
pub mod memory_kv_store;

pub use kv_store::KvStore;
pub use memory_kv_store::MemoryKvStore;
