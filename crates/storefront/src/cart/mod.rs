//! Cart state management.
//!
//! # Architecture
//!
//! - Cart contents and totals are computed by the pure reducer on
//!   [`falcon_core::CartState`]
//! - [`CartStore`] owns the state, persists it after every change, and
//!   publishes snapshots to subscribers
//! - [`CartStorage`] is the durable slot, with file and in-memory backends
//!
//! # Example
//!
//! ```rust,ignore
//! use falcon_storefront::cart::{CartStore, FileStorage};
//!
//! let mut store = CartStore::initialize(FileStorage::new(".falcon"));
//!
//! let product = catalog.get_product("iphone-15-plus").await;
//! let variation = product.find_variation(Some("Blue"), Some("128GB"));
//! store.add_to_cart(&product, 2, variation, Some("Blue"), Some("128GB"));
//!
//! assert_eq!(store.cart_items_count(), 2);
//! ```

mod storage;
mod store;

pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError};
pub use store::{CART_STORAGE_KEY, CartStore};
