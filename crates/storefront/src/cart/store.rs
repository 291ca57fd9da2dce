//! The cart store: single source of truth for cart contents.
//!
//! A [`CartStore`] owns the current [`CartState`], hydrates it from durable
//! storage once at construction, and after every mutation:
//!
//! 1. publishes the new snapshot to subscribers (`tokio::sync::watch`)
//! 2. writes the full snapshot back to storage under [`CART_STORAGE_KEY`],
//!    or deletes that key when the cart was cleared
//!
//! Storage failures are logged and swallowed. They never block the in-memory
//! mutation and never reach the caller.

use falcon_core::{CartState, Product, ProductVariation, Price};
use tokio::sync::watch;
use tracing::{debug, instrument, warn};

use super::storage::CartStorage;

/// Storage key holding the JSON-encoded cart snapshot.
pub const CART_STORAGE_KEY: &str = "falcon_cart";

/// Owned cart state with persistence and change notification.
///
/// Operations take `&mut self` and run to completion before returning, so
/// they are atomic with respect to each other. Share one instance per running
/// application behind a lock (see `AppState`).
pub struct CartStore {
    state: CartState,
    storage: Box<dyn CartStorage>,
    updates: watch::Sender<CartState>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .field("subscribers", &self.updates.receiver_count())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Create a store, adopting the persisted snapshot if one is readable.
    ///
    /// A missing, unreadable, or malformed snapshot yields an empty cart.
    pub fn initialize(storage: impl CartStorage + 'static) -> Self {
        let state = load_snapshot(&storage);
        let (updates, _) = watch::channel(state.clone());
        Self {
            state,
            storage: Box::new(storage),
            updates,
        }
    }

    /// The current cart.
    #[must_use]
    pub const fn cart(&self) -> &CartState {
        &self.state
    }

    /// Receive every snapshot published after a mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.updates.subscribe()
    }

    /// Add `quantity` units of a product selection, merging with an existing
    /// line that has the same product, variation, color and size.
    pub fn add_to_cart(
        &mut self,
        product: &Product,
        quantity: u32,
        variation: Option<&ProductVariation>,
        color: Option<&str>,
        size: Option<&str>,
    ) -> &CartState {
        let item_id = self.state.add(product, quantity, variation, color, size);
        debug!(%item_id, quantity, "Added to cart");
        self.commit()
    }

    /// Set a line's quantity; zero or less removes the line.
    pub fn update_quantity(&mut self, item_id: &str, quantity: i64) -> &CartState {
        self.state.set_quantity(item_id, quantity);
        self.commit()
    }

    /// Remove a line. Unknown IDs are a no-op.
    pub fn remove_from_cart(&mut self, item_id: &str) -> &CartState {
        self.state.remove(item_id);
        self.commit()
    }

    /// Apply a caller-computed flat discount under `code`.
    pub fn apply_coupon(&mut self, code: &str, discount: Price) -> &CartState {
        self.state.apply_coupon(code, discount);
        self.commit()
    }

    /// Reset to the empty cart and drop the persisted snapshot.
    pub fn clear_cart(&mut self) -> &CartState {
        self.state.clear();
        self.updates.send_replace(self.state.clone());
        if let Err(e) = self.storage.remove_item(CART_STORAGE_KEY) {
            warn!(error = %e, "Failed to clear cart storage");
        }
        &self.state
    }

    /// Total units across all lines.
    #[must_use]
    pub fn cart_items_count(&self) -> u64 {
        self.state.item_count()
    }

    fn commit(&mut self) -> &CartState {
        self.updates.send_replace(self.state.clone());
        self.persist();
        &self.state
    }

    #[instrument(skip(self), fields(items = self.state.items.len()))]
    fn persist(&self) {
        let snapshot = match serde_json::to_string(&self.state) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "Failed to encode cart snapshot");
                return;
            }
        };

        if let Err(e) = self.storage.set_item(CART_STORAGE_KEY, &snapshot) {
            warn!(error = %e, "Failed to save cart to storage");
        }
    }
}

/// Read the persisted snapshot, falling back to an empty cart.
fn load_snapshot(storage: &dyn CartStorage) -> CartState {
    match storage.get_item(CART_STORAGE_KEY) {
        Ok(Some(raw)) => match serde_json::from_str::<CartState>(&raw) {
            Ok(state) => {
                debug!(items = state.items.len(), "Loaded cart from storage");
                state
            }
            Err(e) => {
                warn!(error = %e, "Error loading cart from storage, starting empty");
                CartState::new()
            }
        },
        Ok(None) => CartState::new(),
        Err(e) => {
            warn!(error = %e, "Failed to read cart storage, starting empty");
            CartState::new()
        }
    }
}
