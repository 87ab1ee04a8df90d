use thiserror::Error;

use crate::lists::domain::ListKey;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("store error: {0}")]
    Store(String),
    #[error("stored list {key} is not valid JSON: {reason}")]
    Corrupt { key: ListKey, reason: String },
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self { Self::Validation(msg.into()) }

    pub fn is_validation(&self) -> bool { matches!(self, Self::Validation(_)) }
}
