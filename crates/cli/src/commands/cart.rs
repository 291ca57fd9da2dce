//! Cart commands.
//!
//! Operate on the same file-backed cart the server restores on startup.
//! Run them while the server is stopped; a running server keeps its own
//! in-memory copy and will overwrite the file on its next mutation.
//!
//! # Environment Variables
//!
//! - `FALCON_DATA_DIR` - Directory holding `falcon_cart.json`

use falcon_storefront::cart::{CartStore, FileStorage};
use falcon_storefront::config::StorefrontConfig;
use falcon_storefront::routes::cart::CartView;
use serde_json::json;

use super::{CommandError, to_json};

/// Open the persisted cart.
pub fn open(config: &StorefrontConfig) -> CartStore {
    CartStore::initialize(FileStorage::new(config.data_dir.clone()))
}

/// Render the cart view.
pub fn show(store: &CartStore) -> Result<String, CommandError> {
    to_json(&CartView::from(store.cart()))
}

/// Render the total unit count.
pub fn count(store: &CartStore) -> Result<String, CommandError> {
    to_json(&json!({ "count": store.cart_items_count() }))
}

/// Empty the cart and render the result.
pub fn clear(store: &mut CartStore) -> Result<String, CommandError> {
    let cart = store.clear_cart();
    tracing::info!("Cart cleared");
    to_json(&CartView::from(cart))
}

/// Remove one line and render the result.
pub fn remove(store: &mut CartStore, item_id: &str) -> Result<String, CommandError> {
    if store.cart().find(item_id).is_none() {
        tracing::warn!(item_id, "No cart line with this ID; cart unchanged");
    }
    to_json(&CartView::from(store.remove_from_cart(item_id)))
}
