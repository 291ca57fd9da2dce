//! Falcon storefront library.
//!
//! This crate provides the cart store, catalog client, and HTTP surface as a
//! library, allowing them to be tested and reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod coupons;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
