use serde_json::Value;

use crate::errors::ServiceError;

/// Key a stored list lives under.
pub type ListKey = u64;

/// Request body field carrying the list to store.
pub const NEW_ITEM_FIELD: &str = "new_item";

pub const MISSING_NEW_ITEM: &str = "no data[new_item]";
pub const NEW_ITEM_NOT_LIST: &str = "new_item isn't list";

/// Pull `new_item` out of a submitted body and check it is a JSON array.
///
/// A body that is not an object, lacks the field, or holds `null` counts as
/// missing data.
pub fn extract_new_item(body: &Value) -> Result<&Vec<Value>, ServiceError> {
    match body.get(NEW_ITEM_FIELD) {
        None | Some(Value::Null) => Err(ServiceError::validation(MISSING_NEW_ITEM)),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(ServiceError::validation(NEW_ITEM_NOT_LIST)),
    }
}
