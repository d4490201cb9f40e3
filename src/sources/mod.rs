//! Upstream collaborators consumed by the price collector.
//!
//! The traits describe the two services the pipeline depends on. The default
//! implementations talk to Open Prices and Open Food Facts over HTTP; tests and
//! embedders can substitute their own.

pub mod open_prices;
pub mod product_search;

pub use open_prices::OpenPricesSource;
pub use product_search::ProductSearchResolver;

use serde_json::Value;

use crate::error::Result;

/// Raw price observations, newest first.
pub trait PriceSource: Send + Sync {
    /// Items whose product name loosely matches `keyword`.
    fn fetch_by_name(&self, keyword: &str, size: usize) -> Result<Vec<Value>>;

    /// Items recorded against exactly `code`.
    fn fetch_by_code(&self, code: &str, size: usize) -> Result<Vec<Value>>;
}

/// Resolves a free-text keyword to product codes.
pub trait ProductCodeResolver: Send + Sync {
    /// Up to `max_codes` distinct numeric product codes for `keyword`.
    fn resolve(&self, keyword: &str, max_codes: usize) -> Result<Vec<String>>;
}
