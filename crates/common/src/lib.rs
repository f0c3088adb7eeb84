//! Shared building blocks for the foodshare crates: logging setup and
//! small response types used by more than one crate.

pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn success_serializes_flag() {
        let v = serde_json::to_value(types::Success::default()).unwrap();
        assert_eq!(v, serde_json::json!({ "success": true }));
    }
}
