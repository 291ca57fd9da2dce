//! Catalog REST API client.
//!
//! # Architecture
//!
//! - Plain JSON over `reqwest`; the catalog API is the source of truth
//! - In-memory caching via `moka` for successful lookups (5 minute TTL)
//! - Category and single-product lookups never fail: on any transport,
//!   status, or decoding error they log and return [`fallback`] data, which
//!   is not cached
//! - The product listing has no fallback and surfaces [`CatalogError`]
//!
//! # Endpoints
//!
//! ```text
//! GET {base}/categories        - category list
//! GET {base}/shop/products     - product list
//! GET {base}/product/{slug}    - single product
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use falcon_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog)?;
//! let (product, categories) = tokio::join!(
//!     client.get_product("iphone-15-plus"),
//!     client.get_categories(),
//! );
//! ```

mod cache;
pub mod fallback;

use std::sync::Arc;
use std::time::Duration;

use falcon_core::{Category, Product};
use moka::future::Cache;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::config::CatalogConfig;

use cache::{CacheKey, CacheValue};

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connection, timeout, client construction).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with a non-success status.
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the catalog REST API.
///
/// Cheaply cloneable; clones share the HTTP connection pool and cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<CacheKey, CacheValue>,
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.inner.base_url)
            .field("cached_entries", &self.inner.cache.entry_count())
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Create a new catalog API client.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Http` if the HTTP client cannot be built.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                cache,
            }),
        })
    }

    /// The API base URL requests are made against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Execute a GET request and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let url = format!("{}{path}", self.inner.base_url);
        debug!(method = "GET", %url, "Catalog request");

        let response = self
            .inner
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        debug!(status = status.as_u16(), %url, "Catalog response");

        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url,
            });
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, %url, body_len = body.len(), "Catalog response did not decode");
            CatalogError::Parse(e)
        })
    }

    /// Fetch all categories, falling back to the fixed category list.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Vec<Category> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            return categories;
        }

        match self.get_json::<Vec<Category>>("/categories").await {
            Ok(categories) => {
                self.inner
                    .cache
                    .insert(CacheKey::Categories, CacheValue::Categories(categories.clone()))
                    .await;
                categories
            }
            Err(e) => {
                warn!(error = %e, "Error fetching categories, using fallback");
                fallback::categories()
            }
        }
    }

    /// Fetch the full product listing.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on transport, status, or decoding failures.
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.get_json("/shop/products").await.inspect_err(|e| {
            warn!(error = %e, "Error fetching products");
        })
    }

    /// Fetch a product by slug, falling back to the demo product.
    #[instrument(skip(self))]
    pub async fn get_product(&self, slug: &str) -> Product {
        let key = CacheKey::Product(slug.to_string());
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&key).await {
            debug!("Product served from cache");
            return *product;
        }

        let path = format!("/product/{}", urlencoding::encode(slug));
        match self.get_json::<Product>(&path).await {
            Ok(product) => {
                self.inner
                    .cache
                    .insert(key, CacheValue::Product(Box::new(product.clone())))
                    .await;
                product
            }
            Err(e) => {
                warn!(error = %e, "Error fetching product, using fallback");
                fallback::product()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use tokio::net::TcpListener;

    use super::*;

    /// Client pointed at a port nothing listens on.
    fn unreachable_client() -> CatalogClient {
        CatalogClient::new(&CatalogConfig {
            base_url: "http://127.0.0.1:9/api/v1/".to_string(),
            timeout: Duration::from_secs(2),
        })
        .unwrap()
    }

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::Status {
            status: 404,
            url: "http://api/product/x".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unexpected status 404 from http://api/product/x"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        assert_eq!(unreachable_client().base_url(), "http://127.0.0.1:9/api/v1");
    }

    #[tokio::test]
    async fn test_categories_fall_back_when_unreachable() {
        let categories = unreachable_client().get_categories().await;
        assert_eq!(categories, fallback::categories());
    }

    #[tokio::test]
    async fn test_product_falls_back_when_unreachable() {
        let product = unreachable_client().get_product("anything").await;
        assert_eq!(product, fallback::product());
    }

    #[tokio::test]
    async fn test_products_listing_propagates_errors() {
        let result = unreachable_client().get_products().await;
        assert!(matches!(result, Err(CatalogError::Http(_))));
    }

    /// Catalog API stand-in on an ephemeral port.
    ///
    /// `/product/broken` and `/shop/products` answer 500, `/product/garbled`
    /// answers with a body that is not JSON. Every request bumps the returned
    /// hit counter.
    async fn spawn_catalog() -> (CatalogClient, Arc<AtomicUsize>) {
        async fn product(
            State(hits): State<Arc<AtomicUsize>>,
            Path(slug): Path<String>,
        ) -> Response {
            hits.fetch_add(1, Ordering::SeqCst);
            match slug.as_str() {
                "broken" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
                "garbled" => "<html>maintenance</html>".into_response(),
                _ => Json(json!({
                    "id": "42",
                    "name": "Rice Cooker",
                    "slug": &slug,
                    "price": 4500,
                    "variations": [
                        {"id": "r1", "color": "White", "size": "1.8L", "price": 4500, "stock": 3}
                    ]
                }))
                .into_response(),
            }
        }

        async fn categories(State(hits): State<Arc<AtomicUsize>>) -> Json<serde_json::Value> {
            hits.fetch_add(1, Ordering::SeqCst);
            Json(json!([{"id": "9", "name": "Kitchen", "slug": "kitchen"}]))
        }

        async fn products(State(hits): State<Arc<AtomicUsize>>) -> StatusCode {
            hits.fetch_add(1, Ordering::SeqCst);
            StatusCode::INTERNAL_SERVER_ERROR
        }

        let hits = Arc::new(AtomicUsize::new(0));
        let router = Router::new()
            .route("/api/v1/product/{slug}", get(product))
            .route("/api/v1/categories", get(categories))
            .route("/api/v1/shop/products", get(products))
            .with_state(hits.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let client = CatalogClient::new(&CatalogConfig {
            base_url: format!("http://{addr}/api/v1"),
            timeout: Duration::from_secs(5),
        })
        .unwrap();
        (client, hits)
    }

    #[tokio::test]
    async fn test_product_is_decoded_and_cached() {
        let (client, hits) = spawn_catalog().await;

        let first = client.get_product("rice-cooker").await;
        assert_eq!(first.id.as_str(), "42");
        assert_eq!(first.slug, "rice-cooker");
        assert_eq!(first.variations.len(), 1);

        let second = client.get_product("rice-cooker").await;
        assert_eq!(second, first);
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        client.inner.cache.run_pending_tasks().await;
        assert_eq!(client.inner.cache.entry_count(), 1);
    }

    #[tokio::test]
    async fn test_product_server_error_falls_back_uncached() {
        let (client, hits) = spawn_catalog().await;

        assert_eq!(client.get_product("broken").await, fallback::product());
        assert_eq!(client.get_product("broken").await, fallback::product());
        assert_eq!(hits.load(Ordering::SeqCst), 2);

        client.inner.cache.run_pending_tasks().await;
        assert_eq!(client.inner.cache.entry_count(), 0);
    }

    #[tokio::test]
    async fn test_product_undecodable_body_falls_back() {
        let (client, _) = spawn_catalog().await;
        assert_eq!(client.get_product("garbled").await, fallback::product());
    }

    #[tokio::test]
    async fn test_products_listing_reports_server_error() {
        let (client, _) = spawn_catalog().await;
        let result = client.get_products().await;
        assert!(matches!(
            result,
            Err(CatalogError::Status { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_categories_are_cached() {
        let (client, hits) = spawn_catalog().await;

        let categories = client.get_categories().await;
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].slug, "kitchen");

        client.get_categories().await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fallbacks_are_not_cached() {
        let client = unreachable_client();
        client.get_product("anything").await;
        client.get_categories().await;
        client.inner.cache.run_pending_tasks().await;
        assert_eq!(client.inner.cache.entry_count(), 0);
    }
}
