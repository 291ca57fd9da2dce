//! Cache types for catalog API responses.

use falcon_core::{Category, Product};

/// Cache key for catalog lookups.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Product(String),
    Categories,
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Categories(Vec<Category>),
}
