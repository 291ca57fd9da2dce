//! Cart route handlers.
//!
//! Every mutation answers with the resulting [`CartView`], so clients never
//! need a follow-up read to refresh their cart display.

use axum::{
    Json,
    extract::{Path, State},
};
use falcon_core::{CartItem, CartState, Price};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::instrument;

use crate::coupons;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// Label shown for shipping; no carrier pricing exists.
pub const SHIPPING_LABEL: &str = "Free";

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemView {
    pub id: String,
    pub product_id: String,
    pub slug: String,
    pub name: String,
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u64,
    pub subtotal: String,
    /// Present only while a positive discount is applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    pub shipping: &'static str,
    pub total: String,
}

// =============================================================================
// Type Conversions
// =============================================================================

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.to_string(),
            product_id: item.product.id.to_string(),
            slug: item.product.slug.clone(),
            name: item.product.name.clone(),
            image: item.product.images.first().cloned(),
            variation_id: item
                .selected_variation
                .as_ref()
                .map(|v| v.id.to_string()),
            color: item.color.clone(),
            size: item.size.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price().to_string(),
            line_total: item.line_total().to_string(),
        }
    }
}

impl From<&CartState> for CartView {
    fn from(cart: &CartState) -> Self {
        Self {
            items: cart.items.iter().map(CartItemView::from).collect(),
            item_count: cart.item_count(),
            subtotal: cart.subtotal.to_string(),
            discount: (cart.discount > Price::ZERO).then(|| cart.discount.to_string()),
            coupon_code: cart.coupon_code.clone(),
            shipping: SHIPPING_LABEL,
            total: cart.total.to_string(),
        }
    }
}

// =============================================================================
// Request Bodies
// =============================================================================

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub slug: String,
    pub quantity: Option<u32>,
    pub color: Option<String>,
    pub size: Option<String>,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i64,
}

/// Apply coupon request body.
#[derive(Debug, Deserialize)]
pub struct ApplyCouponRequest {
    pub code: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    let cart = state.cart().lock().await;
    Json(CartView::from(cart.cart()))
}

/// Add a product selection to the cart.
///
/// A product with variations is always added as one of them: a missing color
/// or size is taken from the first variation matching the other half, and no
/// selection at all preselects the first variation like the product page does.
/// A selection no variation matches is rejected.
#[instrument(skip(state, form), fields(slug = %form.slug))]
pub async fn add(
    State(state): State<AppState>,
    Json(form): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let quantity = form.quantity.unwrap_or(1);
    if quantity == 0 {
        return Err(AppError::BadRequest(
            "quantity must be at least 1".to_string(),
        ));
    }

    let product = state.catalog().get_product(&form.slug).await;

    let (variation, color, size) = if product.variations.is_empty() {
        (None, form.color.as_deref(), form.size.as_deref())
    } else {
        let variation = product
            .select_variation(form.color.as_deref(), form.size.as_deref())
            .ok_or_else(|| {
                AppError::BadRequest("no variation matches the selected options".to_string())
            })?;
        (
            Some(variation),
            variation.color.as_deref(),
            variation.size.as_deref(),
        )
    };

    let mut cart = state.cart().lock().await;
    let view = CartView::from(cart.add_to_cart(
        &product,
        quantity,
        variation,
        color,
        size,
    ));

    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("product_id", product.id.as_str())]),
    );
    tracing::info!(product_id = %product.id, quantity, "Item added to cart");

    Ok(Json(view))
}

/// Set a line's quantity. Zero or less removes the line.
#[instrument(skip(state, form))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<UpdateQuantityRequest>,
) -> Json<CartView> {
    let mut cart = state.cart().lock().await;
    Json(CartView::from(cart.update_quantity(&id, form.quantity)))
}

/// Remove a line. Unknown IDs leave the cart unchanged.
#[instrument(skip(state))]
pub async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> Json<CartView> {
    let mut cart = state.cart().lock().await;
    Json(CartView::from(cart.remove_from_cart(&id)))
}

/// Apply a coupon code, pricing it against the current subtotal.
#[instrument(skip(state, form))]
pub async fn apply_coupon(
    State(state): State<AppState>,
    Json(form): Json<ApplyCouponRequest>,
) -> Result<Json<CartView>> {
    let code = form.code.trim();
    if code.is_empty() {
        return Err(AppError::BadRequest("coupon code is required".to_string()));
    }

    let mut cart = state.cart().lock().await;
    let subtotal = CartState::subtotal_of(&cart.cart().items);
    let discount = coupons::discount_for(code, subtotal);
    tracing::info!(code, %discount, "Coupon applied");

    Ok(Json(CartView::from(cart.apply_coupon(code, discount))))
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<CartView> {
    let mut cart = state.cart().lock().await;
    Json(CartView::from(cart.clear_cart()))
}

/// Total units in the cart, for the header badge.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Json<Value> {
    let cart = state.cart().lock().await;
    Json(json!({ "count": cart.cart_items_count() }))
}

#[cfg(test)]
mod tests {
    use falcon_core::{Product, ProductId};

    use super::*;

    fn product(id: &str, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            slug: format!("product-{id}"),
            description: String::new(),
            specification: None,
            price: Price::from_major(price),
            original_price: None,
            discount: None,
            rating: 0.0,
            review_count: 0,
            images: vec![format!("https://img.example.com/{id}.jpg")],
            category: None,
            variations: Vec::new(),
            in_stock: true,
            brand: None,
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_cart_view_formats_prices() {
        let mut cart = CartState::new();
        cart.add(&product("1", 1_500), 2, None, None, None);

        let view = CartView::from(&cart);
        assert_eq!(view.item_count, 2);
        assert_eq!(view.subtotal, "৳3,000");
        assert_eq!(view.total, "৳3,000");
        assert_eq!(view.shipping, "Free");
        assert!(view.discount.is_none());
        assert_eq!(view.items[0].unit_price, "৳1,500");
        assert_eq!(view.items[0].line_total, "৳3,000");
        assert_eq!(
            view.items[0].image.as_deref(),
            Some("https://img.example.com/1.jpg")
        );
    }

    #[test]
    fn test_cart_view_shows_positive_discount_only() {
        let mut cart = CartState::new();
        cart.add(&product("1", 300), 1, None, None, None);

        cart.apply_coupon("NOPE", Price::ZERO);
        let view = CartView::from(&cart);
        assert!(view.discount.is_none());
        assert_eq!(view.coupon_code.as_deref(), Some("NOPE"));

        cart.apply_coupon("SAVE10", Price::from_major(30));
        let view = CartView::from(&cart);
        assert_eq!(view.discount.as_deref(), Some("৳30"));
        assert_eq!(view.total, "৳270");
    }
}
