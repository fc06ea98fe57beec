pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok", database: "connected" };
        let v = serde_json::to_value(&h).unwrap();
        assert_eq!(v["status"], "ok");
        assert_eq!(v["database"], "connected");
    }

    #[test]
    fn success_message_omits_absent_message() {
        let v = serde_json::to_value(types::SuccessBody::ok()).unwrap();
        assert_eq!(v, serde_json::json!({"success": true}));
    }
}
