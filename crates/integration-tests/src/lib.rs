//! Integration tests for Falcon.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p falcon-integration-tests
//! ```
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot`; no
//! server or catalog API needs to be running. The catalog client points at a
//! closed local port, so every catalog lookup exercises its fallback path.
//!
//! # Test Categories
//!
//! - `cart_api` - Cart endpoints and persistence
//! - `catalog_api` - Category and product endpoints

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use falcon_storefront::cart::{CartStorage, CartStore, MemoryStorage};
use falcon_storefront::config::{CatalogConfig, StorefrontConfig};
use falcon_storefront::routes;
use falcon_storefront::state::AppState;
use serde_json::Value;
use tower::ServiceExt;

/// Catalog base URL nothing listens on.
pub const UNREACHABLE_CATALOG: &str = "http://127.0.0.1:9/api/v1";

/// An in-process storefront.
pub struct TestContext {
    pub app: Router,
    pub state: AppState,
}

impl TestContext {
    /// Storefront with an empty in-memory cart.
    #[must_use]
    pub fn new() -> Self {
        Self::with_storage(MemoryStorage::new())
    }

    /// Storefront whose cart is restored from `storage`.
    #[must_use]
    pub fn with_storage(storage: impl CartStorage + 'static) -> Self {
        let config = test_config();
        let state = AppState::new(&config, CartStore::initialize(storage)).unwrap();
        Self {
            app: routes::app(state.clone()),
            state,
        }
    }

    /// Send a request, returning the status and the body parsed as JSON
    /// (`Value::Null` for empty or non-JSON bodies).
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Default configuration with the catalog pointed at [`UNREACHABLE_CATALOG`].
#[must_use]
pub fn test_config() -> StorefrontConfig {
    let mut config = StorefrontConfig::from_lookup(|_| None).unwrap();
    config.catalog = CatalogConfig {
        base_url: UNREACHABLE_CATALOG.to_string(),
        timeout: Duration::from_secs(2),
    };
    config
}
