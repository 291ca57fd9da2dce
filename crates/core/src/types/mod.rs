//! Core types for Falcon.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod catalog;
pub mod id;
pub mod price;

pub use cart::{CartItem, CartItemKey, CartState};
pub use catalog::{Category, Product, ProductVariation};
pub use id::*;
pub use price::Price;
