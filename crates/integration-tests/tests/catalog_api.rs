//! Integration tests for the catalog API with an unreachable upstream.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use falcon_integration_tests::TestContext;
use falcon_storefront::middleware::REQUEST_ID_HEADER;

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new();
    let (status, _) = ctx.get("/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_categories_fall_back() {
    let ctx = TestContext::new();

    let (status, categories) = ctx.get("/api/categories").await;
    assert_eq!(status, StatusCode::OK);

    let slugs: Vec<&str> = categories
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["slug"].as_str().unwrap())
        .collect();
    assert_eq!(
        slugs,
        vec![
            "electronics",
            "home-appliances",
            "mother-baby",
            "automotive",
            "sports-gear"
        ]
    );
}

#[tokio::test]
async fn test_product_listing_reports_upstream_failure() {
    let ctx = TestContext::new();

    let (status, body) = ctx.get("/api/products").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "External service error");
}

#[tokio::test]
async fn test_product_detail_falls_back() {
    let ctx = TestContext::new();

    let (status, view) = ctx.get("/api/products/anything-at-all").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["product"]["name"], "iPhone 15 Plus");
    assert_eq!(view["product"]["price"], 89_999);
    assert_eq!(view["colors"], serde_json::json!(["Blue", "Pink", "Black"]));
    assert_eq!(view["sizes"], serde_json::json!(["128GB", "256GB"]));
    assert_eq!(view["selectedColor"], "Blue");
    assert_eq!(view["selectedSize"], "128GB");
    assert_eq!(view["savingsPercent"], 10);
    assert_eq!(view["price"], "৳89,999");
    assert_eq!(view["categories"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let ctx = TestContext::new();

    let request = axum::http::Request::builder()
        .uri("/health")
        .header(REQUEST_ID_HEADER, "trace-abc")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(ctx.app.clone(), request)
        .await
        .unwrap();

    assert_eq!(response.headers()[REQUEST_ID_HEADER], "trace-abc");
}
