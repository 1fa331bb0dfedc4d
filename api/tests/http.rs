use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::util::ServiceExt;

use api::{core::app_state::AppState, router};
use rank_core::{
    Candidate, NO_MATCH_REPLY, ProductIndex, ProductRanker, RankError, RankerConfig, SearchFuture,
};

struct Catalog(Vec<Candidate>);

impl ProductIndex for Catalog {
    fn search<'a>(&'a self, _q: &'a str, _k: usize) -> SearchFuture<'a> {
        Box::pin(async move { Ok(self.0.clone()) })
    }
}

struct Down;

impl ProductIndex for Down {
    fn search<'a>(&'a self, _q: &'a str, _k: usize) -> SearchFuture<'a> {
        Box::pin(async { Err(RankError::Index("qdrant unreachable".into())) })
    }
}

fn app(index: Arc<dyn ProductIndex>) -> axum::Router {
    let ranker = ProductRanker::new(index, RankerConfig::default());
    router(Arc::new(AppState::new(ranker).unwrap()))
}

fn catalog() -> Arc<dyn ProductIndex> {
    let items = (1..=6)
        .map(|i| {
            let brand = if i == 5 { "Titan" } else { "Sonata" };
            Candidate::from_payload(json!({
                "content": format!("Product: Watch {i}\nDescription: Analog watch number {i}"),
                "id": format!("W{i}"),
                "product_name": format!("Analog Watch {i}"),
                "brand": brand,
                "category_path": "Watches >> Wrist Watches",
                "retail_price": 2000,
                "discounted_price": "nan"
            }))
        })
        .collect();
    Arc::new(Catalog(items))
}

fn recommend(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/recommend")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(res: axum::response::Response) -> Value {
    let bytes = body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_healthy() {
    let res = app(catalog())
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(json_body(res).await, json!({"status": "healthy"}));
}

#[tokio::test]
async fn recommend_ranks_brand_match_first() {
    let res = app(catalog())
        .oneshot(recommend(r#"{"query": "titan analog watch"}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let v = json_body(res).await;
    let products = v["products"].as_array().unwrap();
    assert_eq!(products.len(), 4);
    assert_eq!(products[0]["id"], "W5");
    assert_eq!(products[1]["id"], "W1");
    assert!(products[0]["discounted_price"].is_null());
    assert_eq!(products[0]["retail_price"], 2000);
}

#[tokio::test]
async fn request_id_is_echoed() {
    let mut req = recommend(r#"{"query": "watch"}"#);
    req.headers_mut()
        .insert("x-request-id", "abc-123".parse().unwrap());
    let res = app(catalog()).oneshot(req).await.unwrap();
    assert_eq!(res.headers()["x-request-id"], "abc-123");
}

#[tokio::test]
async fn malformed_body_gets_error_envelope() {
    let res = app(catalog())
        .oneshot(recommend(r#"{"q": 1}"#))
        .await
        .unwrap();
    assert!(res.status().is_client_error());

    let v = json_body(res).await;
    assert_eq!(v["success"], false);
    assert_eq!(v["error"]["code"], "BAD_REQUEST");
    assert!(v["error"]["hint"].as_str().unwrap().contains("query"));
}

#[tokio::test]
async fn empty_query_is_400() {
    let res = app(catalog())
        .oneshot(recommend(r#"{"query": ""}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(res).await["error"]["code"], "EMPTY_QUERY");
}

#[tokio::test]
async fn index_outage_still_returns_valid_payload() {
    let res = app(Arc::new(Down))
        .oneshot(recommend(r#"{"query": "watch"}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let v = json_body(res).await;
    assert_eq!(v["reply"], NO_MATCH_REPLY);
    assert_eq!(v["products"], json!([]));
}

#[tokio::test]
async fn metrics_count_requests_and_rankings() {
    let app = app(catalog());

    let health = Request::get("/health").body(Body::empty()).unwrap();
    app.clone().oneshot(health).await.unwrap();
    app.clone()
        .oneshot(recommend(r#"{"query": "analog watch"}"#))
        .await
        .unwrap();
    // Rejected before ranking: counted as a request only.
    app.clone()
        .oneshot(recommend(r#"{"query": "  "}"#))
        .await
        .unwrap();

    let res = app
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(
        res.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/plain")
    );

    let bytes = body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("http_requests_total 3"));
    assert!(text.contains("model_predictions_total 1"));
}
