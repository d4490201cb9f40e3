use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PriceRecord — One normalized price observation
// ---------------------------------------------------------------------------

/// A single retail price observation in canonical form.
///
/// Only constructed by the normalizer once `price` has parsed to a finite
/// number; every other field falls back to a default instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PriceRecord {
    pub price: f64,
    /// ISO-like currency code, empty when upstream omitted it.
    pub currency: String,
    pub country: String,
    pub city: String,
    /// Upstream observation date, kept verbatim.
    pub date: String,
    /// Product code the record was fetched under (two-step lookups only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_code: Option<String>,
}

impl PriceRecord {
    /// Grouping key for city-level aggregation: `"{city}, {country}"`.
    pub fn city_key(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }
}
