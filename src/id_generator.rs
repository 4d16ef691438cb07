use uuid::Uuid;

/// Fresh opaque identity for a drawable object.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
