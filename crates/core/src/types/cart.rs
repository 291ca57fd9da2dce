//! Cart contents and the pure cart reducer.
//!
//! [`CartState`] is the single value a cart store owns. Every mutation here
//! keeps the derived `subtotal` and `total` in step with the item list, so a
//! store only needs to persist and publish the result.
//!
//! # Totals
//!
//! ```text
//! unit_price(item) = item.selected_variation.price, else item.product.price
//! subtotal         = Σ unit_price(item) × item.quantity
//! total            = subtotal − discount
//! ```
//!
//! The discount is a flat amount fixed when a coupon is applied. Item
//! changes keep it as-is, so removing every item after applying a coupon
//! leaves a negative total until the next coupon call.

use serde::{Deserialize, Serialize};

use super::catalog::{Product, ProductVariation, non_blank};
use super::id::{CartItemId, ProductId, VariationId};
use super::price::Price;

/// Placeholder used in item IDs when no variation is selected.
const DEFAULT_VARIATION: &str = "default";

// =============================================================================
// Cart Items
// =============================================================================

/// Composite identity of a cart line.
///
/// Two add-to-cart calls with equal keys merge into one line. Blank color and
/// size values are stored as `None`, so the generated ID and key equality
/// always agree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CartItemKey {
    pub product_id: ProductId,
    pub variation_id: Option<VariationId>,
    pub color: Option<String>,
    pub size: Option<String>,
}

impl CartItemKey {
    #[must_use]
    pub fn new(
        product: &Product,
        variation: Option<&ProductVariation>,
        color: Option<&str>,
        size: Option<&str>,
    ) -> Self {
        Self {
            product_id: product.id.clone(),
            variation_id: variation.map(|v| v.id.clone()),
            color: non_blank(color).map(str::to_owned),
            size: non_blank(size).map(str::to_owned),
        }
    }

    /// Line ID encoding the key, e.g. `1-v1-Blue-128GB` or `7-default--`.
    #[must_use]
    pub fn item_id(&self) -> CartItemId {
        CartItemId::new(format!(
            "{}-{}-{}-{}",
            self.product_id,
            self.variation_id
                .as_ref()
                .map_or(DEFAULT_VARIATION, VariationId::as_str),
            self.color.as_deref().unwrap_or_default(),
            self.size.as_deref().unwrap_or_default(),
        ))
    }
}

/// A line in the cart.
///
/// The product and variation are copies taken when the line was created;
/// pricing reads from them on every recalculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    pub product: Product,
    /// Always at least 1.
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_variation: Option<ProductVariation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl CartItem {
    #[must_use]
    pub fn key(&self) -> CartItemKey {
        CartItemKey::new(
            &self.product,
            self.selected_variation.as_ref(),
            self.color.as_deref(),
            self.size.as_deref(),
        )
    }

    /// Selected variation's price if present, else the product's base price.
    #[must_use]
    pub fn unit_price(&self) -> Price {
        self.product.unit_price(self.selected_variation.as_ref())
    }

    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price().times(self.quantity)
    }
}

// =============================================================================
// Cart State
// =============================================================================

/// Cart contents plus derived monetary totals.
///
/// Item order is insertion order, which is also display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub total: Price,
    #[serde(default)]
    pub subtotal: Price,
    #[serde(default)]
    pub discount: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
}

impl CartState {
    /// An empty cart with zero totals and no coupon.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Σ unit price × quantity over the given items.
    #[must_use]
    pub fn subtotal_of(items: &[CartItem]) -> Price {
        items.iter().map(CartItem::line_total).sum()
    }

    /// Recompute `subtotal` and `total`, keeping the current discount.
    pub fn recalculate(&mut self) {
        self.subtotal = Self::subtotal_of(&self.items);
        self.total = self.subtotal - self.discount;
    }

    /// Add `quantity` units of a selection.
    ///
    /// Merges into the line with the same [`CartItemKey`] by incrementing its
    /// quantity, or appends a new line at the end. A zero quantity changes
    /// nothing. Returns the ID of the affected line.
    pub fn add(
        &mut self,
        product: &Product,
        quantity: u32,
        variation: Option<&ProductVariation>,
        color: Option<&str>,
        size: Option<&str>,
    ) -> CartItemId {
        let key = CartItemKey::new(product, variation, color, size);
        let id = key.item_id();
        if quantity == 0 {
            return id;
        }

        if let Some(item) = self.items.iter_mut().find(|item| item.key() == key) {
            item.quantity = item.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartItem {
                id: id.clone(),
                product: product.clone(),
                quantity,
                selected_variation: variation.cloned(),
                color: key.color,
                size: key.size,
            });
        }

        self.recalculate();
        id
    }

    /// Set a line's quantity (absolute, not additive).
    ///
    /// A quantity of zero or less removes the line. Unknown IDs are ignored.
    pub fn set_quantity(&mut self, item_id: &str, quantity: i64) {
        let quantity = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);
        if quantity == 0 {
            self.remove(item_id);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|item| item.id.as_str() == item_id) {
            item.quantity = quantity;
        }
        self.recalculate();
    }

    /// Remove a line. Unknown IDs are ignored.
    pub fn remove(&mut self, item_id: &str) {
        self.items.retain(|item| item.id.as_str() != item_id);
        self.recalculate();
    }

    /// Record a coupon and its flat discount.
    ///
    /// The subtotal is recomputed fresh and the new discount replaces any
    /// previous one. No validation of the code happens here.
    pub fn apply_coupon(&mut self, code: &str, discount: Price) {
        self.subtotal = Self::subtotal_of(&self.items);
        self.discount = discount;
        self.coupon_code = Some(code.to_owned());
        self.total = self.subtotal - discount;
    }

    /// Reset to the empty cart, dropping discount and coupon.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    #[must_use]
    pub fn find(&self, item_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id.as_str() == item_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
