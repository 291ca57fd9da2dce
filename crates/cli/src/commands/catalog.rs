//! Catalog lookup commands.
//!
//! # Environment Variables
//!
//! - `FALCON_API_BASE_URL` - Catalog REST API base URL
//! - `FALCON_API_TIMEOUT_SECS` - Request timeout in seconds

use falcon_storefront::catalog::CatalogClient;
use falcon_storefront::config::StorefrontConfig;
use falcon_storefront::routes::products::ProductView;

use super::{CommandError, to_json};

/// Build a catalog client from configuration.
pub fn client(config: &StorefrontConfig) -> Result<CatalogClient, CommandError> {
    Ok(CatalogClient::new(&config.catalog)?)
}

/// Render the category list.
pub async fn categories(client: &CatalogClient) -> Result<String, CommandError> {
    to_json(&client.get_categories().await)
}

/// Render a product detail view.
pub async fn product(client: &CatalogClient, slug: &str) -> Result<String, CommandError> {
    let (product, categories) = tokio::join!(client.get_product(slug), client.get_categories());
    to_json(&ProductView::new(product, categories))
}
