//! Shared building blocks for the list store workspace.
//!
//! Kept free of HTTP and storage concerns so every crate can depend on it.

pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health::ok();
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn status_body_serializes_flat() {
        let v = serde_json::to_value(types::StatusBody::ok()).unwrap();
        assert_eq!(v, serde_json::json!({"status": "ok"}));
    }
}
