//! CLI command implementations.
//!
//! Each command returns the text to print; `main` owns stdout.

pub mod cart;
pub mod catalog;

use falcon_storefront::catalog::CatalogError;
use falcon_storefront::config::ConfigError;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog API request failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Output could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Render a value as pretty-printed JSON.
pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<String, CommandError> {
    Ok(serde_json::to_string_pretty(value)?)
}
