//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::cart::CartStore;
use crate::catalog::{CatalogClient, CatalogError};
use crate::config::StorefrontConfig;

/// The single authoritative cart, serialized per operation.
pub type SharedCart = Arc<Mutex<CartStore>>;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources: the catalog client and the cart.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    catalog: CatalogClient,
    cart: SharedCart,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration (catalog API settings)
    /// * `cart` - An initialized cart store
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog HTTP client cannot be built.
    pub fn new(config: &StorefrontConfig, cart: CartStore) -> Result<Self, CatalogError> {
        let catalog = CatalogClient::new(&config.catalog)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                catalog,
                cart: Arc::new(Mutex::new(cart)),
            }),
        })
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a handle to the shared cart.
    #[must_use]
    pub fn cart(&self) -> &SharedCart {
        &self.inner.cart
    }
}
