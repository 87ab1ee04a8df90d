//! Submitted JSON lists: validation on the way in, lazy decoding on the way out.

pub mod domain;
pub mod service;

pub use domain::{ListKey, NEW_ITEM_FIELD};
pub use service::ListService;
