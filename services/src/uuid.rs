use ::uuid::Uuid;

/// Deterministic UUIDv5 for a catalog id.
///
/// Qdrant only accepts integers or UUIDs as point ids, while catalog ids are
/// free-form strings. The URL namespace is fixed so ids stay stable across runs.
pub fn stable_uuid(id: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, id.as_bytes())
}
