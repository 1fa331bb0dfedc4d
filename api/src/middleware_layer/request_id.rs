use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Incoming `X-Request-Id`, if present and non-blank.
pub fn request_id_of(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Guarantees an `X-Request-Id` on both the request seen by handlers and
/// the response: the caller's id is echoed, otherwise one is generated.
pub async fn ensure_request_id(mut req: Request<Body>, next: Next) -> Response {
    let id = request_id_of(req.headers()).unwrap_or_else(generate_request_id);

    if let Ok(v) = HeaderValue::from_str(&id) {
        req.headers_mut().insert(REQUEST_ID_HEADER, v.clone());
        let mut res = next.run(req).await;
        res.headers_mut().insert(REQUEST_ID_HEADER, v);
        return res;
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_trimmed_header() {
        let mut h = HeaderMap::new();
        assert_eq!(request_id_of(&h), None);
        h.insert(REQUEST_ID_HEADER, HeaderValue::from_static("  abc "));
        assert_eq!(request_id_of(&h).as_deref(), Some("abc"));
        h.insert(REQUEST_ID_HEADER, HeaderValue::from_static("   "));
        assert_eq!(request_id_of(&h), None);
    }

    #[test]
    fn generated_ids_are_unique_uuids() {
        let ids: std::collections::HashSet<String> =
            (0..1000).map(|_| generate_request_id()).collect();
        assert_eq!(ids.len(), 1000);
        assert!(ids.iter().all(|id| Uuid::parse_str(id).is_ok()));
    }
}
