//! Falcon Core - Shared types library.
//!
//! This crate provides the domain types used across all Falcon components:
//! - `storefront` - Product detail and cart HTTP surface, cart persistence
//! - `cli` - Command-line tools for inspecting the persisted cart and catalog
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no storage
//! access, no HTTP clients. The cart reducer lives here so that every
//! invariant on cart contents and totals can be tested without a runtime.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, prices, catalog types, and the cart reducer

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
