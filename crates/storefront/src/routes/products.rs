//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use falcon_core::{Category, Product};
use serde::Serialize;
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// Product detail display data.
///
/// Carries the raw product plus everything the product page derives from it:
/// the variation choices, the preselected choice, and formatted prices.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub product: Product,
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings_percent: Option<u32>,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub selected_color: Option<String>,
    pub selected_size: Option<String>,
    /// Price of the preselected variation, or the base price.
    pub selected_price: String,
    pub purchasable: bool,
    pub categories: Vec<Category>,
}

impl ProductView {
    /// Build the view for a product and the site's categories.
    #[must_use]
    pub fn new(product: Product, categories: Vec<Category>) -> Self {
        let (selected_color, selected_size) = product
            .default_selection()
            .map_or((None, None), |(color, size)| {
                (color.map(String::from), size.map(String::from))
            });
        let selected = product.find_variation(selected_color.as_deref(), selected_size.as_deref());

        Self {
            price: product.price.to_string(),
            original_price: product
                .original_price
                .filter(|original| *original > product.price)
                .map(|original| original.to_string()),
            savings_percent: product.savings_percent(),
            colors: to_owned(product.available_colors()),
            sizes: to_owned(product.available_sizes()),
            selected_price: product.unit_price(selected).to_string(),
            purchasable: product.is_purchasable(selected),
            selected_color,
            selected_size,
            categories,
            product,
        }
    }
}

fn to_owned(values: Vec<&str>) -> Vec<String> {
    values.into_iter().map(String::from).collect()
}

/// Category list. Falls back to the built-in categories.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.catalog().get_categories().await)
}

/// Product listing.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = state.catalog().get_products().await?;
    Ok(Json(products))
}

/// Product detail. Falls back to the demo product.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(slug): Path<String>) -> Json<ProductView> {
    let (product, categories) = tokio::join!(
        state.catalog().get_product(&slug),
        state.catalog().get_categories(),
    );
    Json(ProductView::new(product, categories))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fallback;

    #[test]
    fn test_product_view_preselects_first_variation() {
        let view = ProductView::new(fallback::product(), fallback::categories());

        assert_eq!(view.colors, vec!["Blue", "Pink", "Black"]);
        assert_eq!(view.sizes, vec!["128GB", "256GB"]);
        assert_eq!(view.selected_color.as_deref(), Some("Blue"));
        assert_eq!(view.selected_size.as_deref(), Some("128GB"));
        assert_eq!(view.price, "৳89,999");
        assert_eq!(view.original_price.as_deref(), Some("৳99,999"));
        assert_eq!(view.selected_price, "৳89,999");
        assert_eq!(view.savings_percent, Some(10));
        assert!(view.purchasable);
        assert_eq!(view.categories.len(), 5);
    }

    #[test]
    fn test_product_view_without_variations() {
        let mut product = fallback::product();
        product.variations.clear();
        product.original_price = None;

        let view = ProductView::new(product, Vec::new());
        assert!(view.colors.is_empty());
        assert!(view.selected_color.is_none());
        assert!(view.original_price.is_none());
        assert_eq!(view.selected_price, "৳89,999");
    }
}
