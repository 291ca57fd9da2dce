//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                 - Health check
//!
//! # Catalog
//! GET    /api/categories         - Category list (fallback on failure)
//! GET    /api/products           - Product listing (502 on upstream failure)
//! GET    /api/products/{slug}    - Product detail with variation choices
//!
//! # Cart
//! GET    /api/cart               - Cart view
//! DELETE /api/cart               - Clear cart
//! POST   /api/cart/items         - Add to cart
//! PATCH  /api/cart/items/{id}    - Set line quantity (<= 0 removes)
//! DELETE /api/cart/items/{id}    - Remove line
//! POST   /api/cart/coupon        - Apply coupon code
//! GET    /api/cart/count         - Cart count badge
//! ```

pub mod cart;
pub mod products;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the catalog routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{slug}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route("/items", post(cart::add))
        .route("/items/{id}", patch(cart::update).delete(cart::remove))
        .route("/coupon", post(cart::apply_coupon))
        .route("/count", get(cart::count))
}

/// Create all API routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(products::categories))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
}

/// Build the full application with tracing and request IDs.
///
/// Sentry layers are left to the binary so tests run without a client.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", routes())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the catalog API.
async fn health() -> &'static str {
    "ok"
}
