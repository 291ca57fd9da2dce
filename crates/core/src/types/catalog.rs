//! Catalog types as served by the catalog REST API.
//!
//! Field names follow the API's camelCase JSON. Display-only fields that the
//! API may omit (`rating`, `reviewCount`, `images`, ...) fall back to empty
//! defaults so a sparse payload still parses.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId, VariationId};
use super::price::Price;

// =============================================================================
// Categories
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

// =============================================================================
// Products
// =============================================================================

/// A purchasable option of a product with its own price and stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariation {
    pub id: VariationId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    pub price: Price,
    #[serde(default)]
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    /// Newline-separated `Label: value` specification lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specification: Option<String>,
    /// Base price, used when no variation is selected.
    pub price: Price,
    /// Pre-sale price shown struck through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Price>,
    /// Advertised discount percentage, if the API supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variations: Vec<ProductVariation>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

const fn default_in_stock() -> bool {
    true
}

impl Product {
    /// Distinct variation colors in first-seen order.
    #[must_use]
    pub fn available_colors(&self) -> Vec<&str> {
        distinct(self.variations.iter().map(|v| v.color.as_deref()))
    }

    /// Distinct variation sizes in first-seen order.
    #[must_use]
    pub fn available_sizes(&self) -> Vec<&str> {
        distinct(self.variations.iter().map(|v| v.size.as_deref()))
    }

    /// The first variation matching both the color and the size selection.
    ///
    /// Blank selections are treated the same as no selection.
    #[must_use]
    pub fn find_variation(
        &self,
        color: Option<&str>,
        size: Option<&str>,
    ) -> Option<&ProductVariation> {
        let color = non_blank(color);
        let size = non_blank(size);
        self.variations.iter().find(|v| {
            non_blank(v.color.as_deref()) == color && non_blank(v.size.as_deref()) == size
        })
    }

    /// The first variation consistent with a possibly partial selection.
    ///
    /// Only the given (non-empty) halves have to match, so a color alone picks
    /// that color's first variation and no selection picks the first one.
    #[must_use]
    pub fn select_variation(
        &self,
        color: Option<&str>,
        size: Option<&str>,
    ) -> Option<&ProductVariation> {
        let color = non_blank(color);
        let size = non_blank(size);
        self.variations.iter().find(|v| {
            color.is_none_or(|c| non_blank(v.color.as_deref()) == Some(c))
                && size.is_none_or(|s| non_blank(v.size.as_deref()) == Some(s))
        })
    }

    /// The preselected (color, size) pair: that of the first variation.
    #[must_use]
    pub fn default_selection(&self) -> Option<(Option<&str>, Option<&str>)> {
        self.variations
            .first()
            .map(|v| (v.color.as_deref(), v.size.as_deref()))
    }

    /// Unit price for the given selection.
    #[must_use]
    pub fn unit_price(&self, variation: Option<&ProductVariation>) -> Price {
        variation.map_or(self.price, |v| v.price)
    }

    /// Whole-number percentage saved against `original_price`, if discounted.
    #[must_use]
    pub fn savings_percent(&self) -> Option<u32> {
        let original = self.original_price?.amount();
        let current = self.price.amount();
        if original <= current || original.is_zero() {
            return None;
        }
        ((original - current) * Decimal::ONE_HUNDRED / original)
            .round()
            .to_u32()
    }

    /// Whether the selection can be added to a cart.
    #[must_use]
    pub fn is_purchasable(&self, variation: Option<&ProductVariation>) -> bool {
        self.in_stock && variation.is_none_or(|v| v.stock > 0)
    }
}

/// `None` for absent or empty strings.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

fn distinct<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for value in values.filter_map(non_blank) {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}
